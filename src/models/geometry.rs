//! Planar geometry over lon/lat coordinates.

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Bounds of a set of points, or `None` when the set is empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for point in iter {
            bounds.include(*point);
        }
        Some(bounds)
    }

    pub fn include(&mut self, point: Point) {
        self.min.lon = self.min.lon.min(point.lon);
        self.min.lat = self.min.lat.min(point.lat);
        self.max.lon = self.max.lon.max(point.lon);
        self.max.lat = self.max.lat.max(point.lat);
    }

    pub fn union(self, other: Self) -> Self {
        let mut merged = self;
        merged.include(other.min);
        merged.include(other.max);
        merged
    }

    pub fn contains(&self, point: Point) -> bool {
        point.lon >= self.min.lon
            && point.lon <= self.max.lon
            && point.lat >= self.min.lat
            && point.lat <= self.max.lat
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.lon - self.min.lon
    }

    pub fn height(&self) -> f64 {
        self.max.lat - self.min.lat
    }
}

/// A closed ring. The closing point may or may not repeat the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Segments of the ring, including the implicit closing segment.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Even-odd ray casting. Points exactly on an edge or vertex may land on
    /// either side.
    pub fn contains(&self, point: Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing = a.lon + (point.lat - a.lat) / (b.lat - a.lat) * (b.lon - a.lon);
                if point.lon < crossing {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// An exterior ring with optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
    bounds: Option<BoundingBox>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        let bounds = BoundingBox::from_points(exterior.points());
        Self {
            exterior,
            holes,
            bounds,
        }
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn contains(&self, point: Point) -> bool {
        match self.bounds {
            Some(bounds) if bounds.contains(point) => {}
            _ => return false,
        }
        self.exterior.contains(point) && !self.holes.iter().any(|hole| hole.contains(point))
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}
