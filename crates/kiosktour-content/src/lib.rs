//! Kiosk Tour content model
//!
//! Everything the walkthrough reads from disk that does not need the engine:
//!
//! - `monitor_index` - categories and files shown on the in-scene monitor
//! - `catalog` - component metadata shown in the detail panel
//! - `pages` - convention-based page image discovery (`page_001`, `page_002`, ...)
//! - `pager` - page cursor with click cooldown
//! - `layout` - monitor screen layout chosen from the first page's aspect ratio
//! - `error` - the shared `ContentError`

pub mod catalog;
pub mod error;
pub mod layout;
pub mod monitor_index;
pub mod pager;
pub mod pages;

pub use catalog::*;
pub use error::*;
pub use layout::*;
pub use monitor_index::*;
pub use pager::*;
pub use pages::*;

/// Folder (relative to the asset root) holding the monitor index and documents.
pub const MONITOR_CONTENT_DIR: &str = "MonitorContent";
/// File name of the monitor index inside [`MONITOR_CONTENT_DIR`].
pub const MONITOR_INDEX_FILE: &str = "monitorIndex.json";
/// Folder (relative to the asset root) holding the component catalog and its images.
pub const COMPONENT_METADATA_DIR: &str = "ComponentMetadata";
/// File name of the component catalog inside [`COMPONENT_METADATA_DIR`].
pub const COMPONENT_CATALOG_FILE: &str = "cabinetData.json";
