//! Monitor index
//!
//! The monitor index is authored as JSON next to the documents it lists:
//!
//! ```json
//! { "categories": [
//!     { "name": "Research Papers", "files": [
//!         { "title": "Cabinet wiring study", "resourcePath": "MonitorContent/Research/wiring" }
//!     ] }
//! ] }
//! ```
//!
//! Older indexes name a `folder` on the category and a `filename` on each file
//! instead of a `resourcePath`; both shapes are accepted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, ContentResult};
use crate::{MONITOR_CONTENT_DIR, MONITOR_INDEX_FILE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub title: String,

    #[serde(rename = "resourcePath", default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(default)]
    pub files: Vec<FileItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorIndex {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl FileItem {
    /// Folder (relative to the asset root) that holds this document's page images.
    ///
    /// `resourcePath` wins. Otherwise the path is built from the category folder and
    /// the file name without its extension.
    pub fn document_path(&self, category: &Category) -> Option<String> {
        if let Some(path) = self.resource_path.as_deref().filter(|p| !p.trim().is_empty()) {
            return Some(path.trim().trim_end_matches('/').to_string());
        }

        let filename = self.filename.as_deref().filter(|f| !f.trim().is_empty())?;
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);

        let mut path = String::from(MONITOR_CONTENT_DIR);
        if let Some(folder) = category.folder.as_deref().filter(|f| !f.is_empty()) {
            path.push('/');
            path.push_str(folder.trim_matches('/'));
        }
        path.push('/');
        path.push_str(stem);
        Some(path)
    }
}

impl MonitorIndex {
    /// Default location of the index below an asset root.
    pub fn default_path(asset_root: &Path) -> PathBuf {
        asset_root.join(MONITOR_CONTENT_DIR).join(MONITOR_INDEX_FILE)
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

    /// Exact, case-sensitive category lookup.
    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category(&self, name: &str) -> ContentResult<&Category> {
        self.find_category(name)
            .ok_or_else(|| ContentError::CategoryNotFound(name.to_string()))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_files(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "categories": [
            { "name": "Research Papers", "files": [
                { "title": "Wiring", "resourcePath": "MonitorContent/Research/wiring/" },
                { "title": "Cooling", "resourcePath": "MonitorContent/Research/cooling" }
            ] },
            { "name": "ECAD Files", "folder": "ECAD", "files": [
                { "title": "Main cabinet", "filename": "main_cabinet.pdf" }
            ] }
        ]
    }"#;

    fn index() -> MonitorIndex {
        MonitorIndex::from_json_str(INDEX, Path::new("monitorIndex.json")).unwrap()
    }

    #[test]
    fn test_parse_categories_and_files() {
        let index = index();
        assert_eq!(index.category_names(), vec!["Research Papers", "ECAD Files"]);
        assert_eq!(index.total_files(), 3);
    }

    #[test]
    fn test_find_category_is_exact() {
        let index = index();
        assert!(index.find_category("Research Papers").is_some());
        assert!(index.find_category("research papers").is_none());
        assert!(matches!(
            index.category("FAPS PPT"),
            Err(ContentError::CategoryNotFound(name)) if name == "FAPS PPT"
        ));
    }

    #[test]
    fn test_document_path_prefers_resource_path() {
        let index = index();
        let research = index.find_category("Research Papers").unwrap();
        assert_eq!(
            research.files[0].document_path(research).as_deref(),
            Some("MonitorContent/Research/wiring")
        );
    }

    #[test]
    fn test_document_path_from_folder_and_filename() {
        let index = index();
        let ecad = index.find_category("ECAD Files").unwrap();
        assert_eq!(
            ecad.files[0].document_path(ecad).as_deref(),
            Some("MonitorContent/ECAD/main_cabinet")
        );
    }

    #[test]
    fn test_document_path_missing() {
        let category = Category {
            name: "Empty".into(),
            folder: None,
            files: vec![],
        };
        let item = FileItem {
            title: "Nothing".into(),
            resource_path: Some("  ".into()),
            filename: None,
        };
        assert_eq!(item.document_path(&category), None);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let err = MonitorIndex::from_json_str("{ not json", Path::new("idx.json")).unwrap_err();
        assert!(err.to_string().contains("idx.json"));
    }
}
