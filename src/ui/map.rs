//! Map view: region polygons on a canvas, colored by quiz status.

use std::collections::HashSet;

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as Segment, Painter, Shape},
    },
};

use crate::app::App;
use crate::models::{Atlas, Point, Region};
use crate::state::Attempt;
use crate::viewport::Projection;

const DEFAULT_FILL: Color = Color::Rgb(51, 136, 255);
const SOLVED_FILL: Color = Color::Rgb(49, 163, 84);
const CORRECT_FILL: Color = Color::Rgb(116, 196, 118);
const INCORRECT_FILL: Color = Color::Rgb(251, 106, 74);
const OUTLINE: Color = Color::White;

/// Everything the map needs to know about the quiz.
#[derive(Debug, Clone, Copy)]
pub struct MapProps<'a> {
    pub prompt: Option<&'a str>,
    pub solved: &'a HashSet<String>,
    pub last_attempt: Option<&'a Attempt>,
}

/// Visual state of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStatus {
    Default,
    Solved,
    ActiveCorrect,
    ActiveIncorrect,
}

impl RegionStatus {
    /// The just-clicked region shows its feedback color; otherwise solved
    /// regions stay green whatever is being asked.
    pub fn of(region: &str, props: &MapProps<'_>) -> Self {
        match props.last_attempt {
            Some(attempt) if attempt.region == region && attempt.correct => Self::ActiveCorrect,
            Some(attempt) if attempt.region == region => Self::ActiveIncorrect,
            _ if props.solved.contains(region) => Self::Solved,
            _ => Self::Default,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Default => DEFAULT_FILL,
            Self::Solved => SOLVED_FILL,
            Self::ActiveCorrect => CORRECT_FILL,
            Self::ActiveIncorrect => INCORRECT_FILL,
        }
    }
}

/// Handle on the rendered map.
///
/// Holds the projection of the last frame so that terminal coordinates can
/// be turned back into positions. Released whenever the map is not on screen.
#[derive(Debug, Default)]
pub struct MapView {
    projection: Option<Projection>,
}

impl MapView {
    /// Position under a terminal cell, if the map was drawn there.
    pub fn point_at(&self, column: u16, row: u16) -> Option<Point> {
        self.projection?.cell_to_point(column, row)
    }

    /// Region under a terminal cell. Solved regions can't be clicked.
    pub fn region_at<'a>(
        &self,
        atlas: &'a Atlas,
        props: &MapProps<'_>,
        column: u16,
        row: u16,
    ) -> Option<&'a Region> {
        let region = atlas.region_at(self.point_at(column, row)?)?;
        (!props.solved.contains(&region.name)).then_some(region)
    }

    pub fn release(&mut self) {
        self.projection = None;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);

        let projection = app
            .atlas()
            .and_then(Atlas::bounds)
            .and_then(|bounds| Projection::fit(bounds, app.viewport(), inner));
        self.projection = projection;

        let (Some(atlas), Some(projection)) = (app.atlas(), projection) else {
            frame.render_widget(block, area);
            return;
        };

        let props = app.map_props();
        let resolution = (usize::from(inner.width), usize::from(inner.height) * 2);
        let cursor = app.cursor();

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::HalfBlock)
            .x_bounds(projection.x_bounds())
            .y_bounds(projection.y_bounds())
            .paint(move |ctx| {
                for region in atlas.regions() {
                    ctx.draw(&RegionFill {
                        region,
                        projection: &projection,
                        resolution,
                        color: RegionStatus::of(&region.name, &props).color(),
                    });
                }
                ctx.layer();

                for region in atlas.regions() {
                    for ring in region.polygons.iter().flat_map(|polygon| polygon.rings()) {
                        for (a, b) in ring.edges() {
                            let (x1, y1) = projection.project(a);
                            let (x2, y2) = projection.project(b);
                            ctx.draw(&Segment::new(x1, y1, x2, y2, OUTLINE));
                        }
                    }
                }

                if let Some(cursor) = cursor {
                    let (x, y) = projection.project(cursor);
                    ctx.print(x, y, Span::styled("+", Style::default().fg(Color::Yellow).bold()));
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// Fills a region by sampling the canvas grid and testing each sample
/// against the region's polygons.
struct RegionFill<'a> {
    region: &'a Region,
    projection: &'a Projection,
    resolution: (usize, usize),
    color: Color,
}

impl Shape for RegionFill<'_> {
    fn draw(&self, painter: &mut Painter) {
        let Some(bounds) = self.region.bounds() else {
            return;
        };
        let (columns, rows) = self.resolution;
        if columns == 0 || rows == 0 {
            return;
        }

        let [x0, x1] = self.projection.x_bounds();
        let [y0, y1] = self.projection.y_bounds();
        let dx = (x1 - x0) / columns as f64;
        let dy = (y1 - y0) / rows as f64;

        let (left, bottom) = self.projection.project(bounds.min);
        let (right, top) = self.projection.project(bounds.max);
        let i_start = ((left - x0) / dx).floor().max(0.0) as usize;
        let i_end = (((right - x0) / dx).ceil() as usize).min(columns);
        let j_start = ((y1 - top) / dy).floor().max(0.0) as usize;
        let j_end = (((y1 - bottom) / dy).ceil() as usize).min(rows);

        for j in j_start..j_end {
            let y = y1 - (j as f64 + 0.5) * dy;
            for i in i_start..i_end {
                let x = x0 + (i as f64 + 0.5) * dx;
                if !self.region.contains(self.projection.unproject(x, y)) {
                    continue;
                }
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}
