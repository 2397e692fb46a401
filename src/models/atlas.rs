use super::{BoundingBox, Language, Point, Polygon};

/// A named region and its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Region {
    pub fn contains(&self, point: Point) -> bool {
        self.polygons.iter().any(|polygon| polygon.contains(point))
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.polygons
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(BoundingBox::union)
    }
}

/// All regions of one feature collection, named in one language.
///
/// Region names are unique and keep the order in which they first appear in
/// the source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    language: Language,
    regions: Vec<Region>,
}

impl Atlas {
    pub fn new(language: Language, regions: Vec<Region>) -> Self {
        Self { language, regions }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Ordered region identifiers.
    pub fn catalog(&self) -> Vec<String> {
        self.regions.iter().map(|region| region.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.name == name)
    }

    /// First region whose geometry contains `point`.
    pub fn region_at(&self, point: Point) -> Option<&Region> {
        self.regions.iter().find(|region| region.contains(point))
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.regions
            .iter()
            .filter_map(Region::bounds)
            .reduce(BoundingBox::union)
    }
}
