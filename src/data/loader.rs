use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::geojson::FeatureCollection;
use crate::models::{Atlas, Language, Region};

/// Error loading a region feature collection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a GeoJSON feature collection and name its regions in `language`.
pub async fn load_atlas<P: AsRef<Path>>(path: P, language: Language) -> Result<Atlas, LoadError> {
    let path = path.as_ref();

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let atlas = parse_atlas(&json, language).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        ?language,
        regions = atlas.len(),
        "loaded region atlas"
    );
    Ok(atlas)
}

/// Build an atlas from GeoJSON text.
///
/// Features sharing a name are merged into one region. A feature without a
/// name in `language` gets an empty one.
pub fn parse_atlas(json: &str, language: Language) -> Result<Atlas, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    let mut regions: Vec<Region> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for (position, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|properties| language.resolve_name(properties))
            .map(str::to_owned)
            .unwrap_or_else(|| {
                warn!(
                    feature = position,
                    field = language.name_field(),
                    "feature has no region name"
                );
                String::new()
            });

        let polygons = feature
            .geometry
            .map(|geometry| geometry.into_polygons())
            .unwrap_or_default();

        match index_by_name.get(&name) {
            Some(&index) => regions[index].polygons.extend(polygons),
            None => {
                index_by_name.insert(name.clone(), regions.len());
                regions.push(Region { name, polygons });
            }
        }
    }

    Ok(Atlas::new(language, regions))
}
