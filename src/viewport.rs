//! Mapping between lon/lat and terminal cells.
//!
//! Longitudes are scaled by the cosine of the data's middle latitude
//! (equirectangular projection) and the visible window is widened or heightened
//! so that one terminal cell, roughly twice as tall as wide, covers a square
//! patch of ground.

use ratatui::layout::Rect;

use crate::models::{BoundingBox, Point};

/// Height of a terminal cell relative to its width.
const CELL_ASPECT: f64 = 2.0;
/// Margin around the data, as a fraction of its span.
const PADDING: f64 = 0.06;
const MIN_SPAN: f64 = 0.01;
const ZOOM_STEP: f64 = 1.5;
const MAX_ZOOM: f64 = 12.0;

/// User-controlled zoom and center. Zoom 1 shows all the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    center: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            center: None,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self, at: Point) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
        self.center = Some(at);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(1.0);
        if self.zoom <= 1.0 {
            self.center = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pan just enough to keep `point` on screen while zoomed in.
    ///
    /// Whatever the area's aspect, the fitted window spans at least
    /// `data / zoom` in both directions around the center, so the point is
    /// kept inside that core window.
    pub fn follow(&mut self, point: Point, data: BoundingBox) {
        if self.zoom <= 1.0 {
            return;
        }

        let center = self.center.unwrap_or_else(|| data.center());
        let half_lon = data.width() / (2.0 * self.zoom);
        let half_lat = data.height() / (2.0 * self.zoom);

        let lon = center.lon + excess(point.lon - center.lon, half_lon);
        let lat = center.lat + excess(point.lat - center.lat, half_lat);
        self.center = Some(Point::new(lon, lat));
    }
}

/// How far `offset` lies beyond `±half`.
fn excess(offset: f64, half: f64) -> f64 {
    if offset > half {
        offset - half
    } else if offset < -half {
        offset + half
    } else {
        0.0
    }
}

/// Projection for one frame: data bounds fitted into a cell area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    area: Rect,
    lon_scale: f64,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl Projection {
    /// `None` when the area has no cells.
    pub fn fit(data: BoundingBox, viewport: &Viewport, area: Rect) -> Option<Self> {
        if area.width == 0 || area.height == 0 {
            return None;
        }

        let lon_scale = data.center().lat.to_radians().cos().max(0.1);
        let center = viewport.center.unwrap_or_else(|| data.center());

        let mut width = (data.width() * lon_scale).max(MIN_SPAN) * (1.0 + PADDING) / viewport.zoom;
        let mut height = data.height().max(MIN_SPAN) * (1.0 + PADDING) / viewport.zoom;

        let target = f64::from(area.width) / (f64::from(area.height) * CELL_ASPECT);
        if width / height < target {
            width = height * target;
        } else {
            height = width / target;
        }

        let cx = center.lon * lon_scale;
        let cy = center.lat;

        Some(Self {
            area,
            lon_scale,
            x_bounds: [cx - width / 2.0, cx + width / 2.0],
            y_bounds: [cy - height / 2.0, cy + height / 2.0],
        })
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }

    /// Canvas coordinates of a position.
    pub fn project(&self, point: Point) -> (f64, f64) {
        (point.lon * self.lon_scale, point.lat)
    }

    pub fn unproject(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.lon_scale, y)
    }

    /// Position under the center of a terminal cell, if the cell is on the map.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }

        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        let x = self.x_bounds[0] + fx * (self.x_bounds[1] - self.x_bounds[0]);
        let y = self.y_bounds[1] - fy * (self.y_bounds[1] - self.y_bounds[0]);
        Some(self.unproject(x, y))
    }
}
