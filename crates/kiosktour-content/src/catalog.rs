//! Component metadata catalog
//!
//! One JSON document describes every clickable cabinet component:
//! `{ "components": [ { "id": "K1", "name": "...", "imagePath": "images/k1.png", ... } ] }`.
//! Image paths are relative to the catalog's folder.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, ContentResult};
use crate::{COMPONENT_CATALOG_FILE, COMPONENT_METADATA_DIR};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(rename = "parentCabinet", default)]
    pub parent_cabinet: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "imagePath", default)]
    pub image_path: String,

    #[serde(rename = "ecadPath", default)]
    pub ecad_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCatalog {
    #[serde(default)]
    pub components: Vec<ComponentMetadata>,
}

impl ComponentMetadata {
    pub fn has_image(&self) -> bool {
        !self.image_path.trim().is_empty()
    }

    pub fn has_ecad(&self) -> bool {
        !self.ecad_path.trim().is_empty()
    }
}

impl ComponentCatalog {
    pub fn default_path(asset_root: &Path) -> PathBuf {
        asset_root
            .join(COMPONENT_METADATA_DIR)
            .join(COMPONENT_CATALOG_FILE)
    }

    pub fn from_json_str(json: &str, origin: &Path) -> ContentResult<Self> {
        serde_json::from_str(json).map_err(|source| ContentError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> ContentResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }

    /// First component whose id matches exactly.
    pub fn find(&self, id: &str) -> Option<&ComponentMetadata> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> ContentResult<&ComponentMetadata> {
        self.find(id)
            .ok_or_else(|| ContentError::ComponentNotFound(id.to_string()))
    }

    pub fn in_cabinet<'a>(&'a self, cabinet: &'a str) -> impl Iterator<Item = &'a ComponentMetadata> {
        self.components
            .iter()
            .filter(move |c| c.parent_cabinet == cabinet)
    }
}

/// Resolve a catalog-relative image path against the folder the catalog lives in.
pub fn resolve_catalog_relative(catalog_dir: &Path, relative: &str) -> PathBuf {
    catalog_dir.join(relative.trim_start_matches(['/', '\\']))
}
