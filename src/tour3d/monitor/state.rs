//! Monitor browser state
//!
//! Closed -> FileList(category) -> Document(pages, index). The UI is a pure
//! projection of this resource; systems only feed it commands.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use kiosktour_content::{
    discover_pages, first_page_aspect_ratio, ContentError, ContentResult, DocumentPager,
    LayoutConfig, MonitorIndex, PageRef, PageStep, ScreenLayout,
};

use crate::tour3d::types::MonitorConfig;

/// A document open on the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDocument {
    pub title: String,
    pub path: String,
    pub pages: Vec<PageRef>,
    pub pager: DocumentPager,
    pub layout: ScreenLayout,
}

impl OpenDocument {
    pub fn current_page(&self) -> Option<&PageRef> {
        self.pages.get(self.pager.index())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MonitorView {
    #[default]
    Closed,
    FileList,
    Document(OpenDocument),
}

/// Entry of the file list for the current category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub title: String,
    /// `None` when the index gives neither a resource path nor a file name.
    pub document: Option<String>,
}

/// Requests from the monitor buttons.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum MonitorCommand {
    Open,
    Close,
    ShowCategory(String),
    OpenDocument { title: String, path: String },
    NextPage,
    PreviousPage,
    BackToFileList,
}

#[derive(Resource, Debug, Clone)]
pub struct MonitorBrowser {
    asset_root: PathBuf,
    index: Option<MonitorIndex>,
    default_category: String,
    current_category: String,
    layout_config: LayoutConfig,
    cooldown_secs: f64,
    view: MonitorView,
    /// Bumped whenever the file list must be rebuilt.
    list_generation: u64,
}

impl MonitorBrowser {
    pub fn new(asset_root: impl Into<PathBuf>, index: Option<MonitorIndex>, config: &MonitorConfig) -> Self {
        Self {
            asset_root: asset_root.into(),
            index,
            default_category: config.default_category.clone(),
            current_category: config.default_category.clone(),
            layout_config: config.layout,
            cooldown_secs: config.click_cooldown_secs,
            view: MonitorView::Closed,
            list_generation: 0,
        }
    }

    /// Read the monitor index below `asset_root`. A missing or broken index leaves the
    /// browser without data.
    pub fn load(asset_root: &Path, config: &MonitorConfig) -> Self {
        let path = MonitorIndex::default_path(asset_root);
        let index = match MonitorIndex::load_from_file(&path) {
            Ok(index) => {
                info!(
                    "Monitor index loaded: {} categories, {} files",
                    index.categories.len(),
                    index.total_files()
                );
                Some(index)
            }
            Err(e) => {
                error!("Monitor index unavailable: {}", e);
                None
            }
        };
        Self::new(asset_root, index, config)
    }

    pub fn index(&self) -> Option<&MonitorIndex> {
        self.index.as_ref()
    }

    pub fn category_names(&self) -> Vec<String> {
        self.index
            .as_ref()
            .map(|index| index.category_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn view(&self) -> &MonitorView {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        self.view != MonitorView::Closed
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    pub fn document(&self) -> Option<&OpenDocument> {
        match &self.view {
            MonitorView::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn list_generation(&self) -> u64 {
        self.list_generation
    }

    /// Files of the current category, empty when the category is unknown.
    pub fn files(&self) -> Vec<FileEntry> {
        let Some(category) = self
            .index
            .as_ref()
            .and_then(|index| index.find_category(&self.current_category))
        else {
            return Vec::new();
        };

        category
            .files
            .iter()
            .map(|file| FileEntry {
                title: file.title.clone(),
                document: file.document_path(category),
            })
            .collect()
    }

    /// Open the panel on the default category. Refused unless `allowed`.
    pub fn open(&mut self, allowed: bool) -> bool {
        if !allowed {
            info!("Cannot open monitor: not in range or not facing it");
            return false;
        }
        let category = self.default_category.clone();
        let _ = self.show_category(&category);
        true
    }

    /// Show the file list of `name`. Unknown categories leave an empty list.
    pub fn show_category(&mut self, name: &str) -> ContentResult<()> {
        self.current_category = name.to_string();
        self.view = MonitorView::FileList;
        self.list_generation += 1;

        let Some(index) = self.index.as_ref() else {
            warn!("Monitor data not loaded, category {} is empty", name);
            return Err(ContentError::CategoryNotFound(name.to_string()));
        };
        match index.category(name) {
            Ok(_) => {
                info!("Displaying category: {}", name);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Open a document folder. With no pages the browser returns to the file list.
    pub fn open_document(&mut self, title: &str, path: &str) -> ContentResult<usize> {
        info!("Opening document: {} from {}", title, path);
        self.view = MonitorView::FileList;

        let pages = discover_pages(&self.asset_root, path);
        if pages.is_empty() {
            error!(
                "No pages found for document {}. Expected page_001.png, page_002.png, ...",
                path
            );
            let category = self.current_category.clone();
            let _ = self.show_category(&category);
            return Err(ContentError::NoPages(path.to_string()));
        }

        let layout = self
            .layout_config
            .choose(first_page_aspect_ratio(&self.asset_root, path));
        let count = pages.len();
        info!("Document loaded with {} pages ({:?})", count, layout.fit);

        self.view = MonitorView::Document(OpenDocument {
            title: title.to_string(),
            path: path.to_string(),
            pages,
            pager: DocumentPager::with_cooldown(count, self.cooldown_secs),
            layout,
        });
        Ok(count)
    }

    pub fn next_page(&mut self, now: f64) -> Option<PageStep> {
        let MonitorView::Document(doc) = &mut self.view else {
            return None;
        };
        let step = doc.pager.next(now);
        match step {
            PageStep::Moved(index) => debug!("Page {} of {}", index + 1, doc.pages.len()),
            PageStep::AtEnd => info!("Cannot go to next page: at end of document"),
            PageStep::Cooldown => debug!("Next page on cooldown, ignoring click"),
            PageStep::AtStart => {}
        }
        Some(step)
    }

    pub fn previous_page(&mut self, now: f64) -> Option<PageStep> {
        let MonitorView::Document(doc) = &mut self.view else {
            return None;
        };
        let step = doc.pager.previous(now);
        match step {
            PageStep::Moved(index) => debug!("Page {} of {}", index + 1, doc.pages.len()),
            PageStep::AtStart => info!("Cannot go to previous page: at beginning of document"),
            PageStep::Cooldown => debug!("Previous page on cooldown, ignoring click"),
            PageStep::AtEnd => {}
        }
        Some(step)
    }

    /// Drop the open document and show the current category again.
    pub fn back_to_file_list(&mut self) {
        let category = self.current_category.clone();
        let _ = self.show_category(&category);
    }

    pub fn close(&mut self) {
        self.view = MonitorView::Closed;
        self.list_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{ "categories": [
        { "name": "Research Papers", "files": [
            { "title": "Missing", "resourcePath": "MonitorContent/none" },
            { "title": "Broken" } ] },
        { "name": "ECAD Files", "files": [] } ] }"#;

    fn browser() -> MonitorBrowser {
        let index = MonitorIndex::from_json_str(INDEX, Path::new("index.json")).unwrap();
        MonitorBrowser::new(
            std::env::temp_dir().join("kiosktour-monitor-state-empty"),
            Some(index),
            &MonitorConfig::default(),
        )
    }

    #[test]
    fn test_starts_closed() {
        let browser = browser();
        assert!(!browser.is_open());
        assert_eq!(browser.view(), &MonitorView::Closed);
    }

    #[test]
    fn test_open_is_refused_without_access() {
        let mut browser = browser();
        assert!(!browser.open(false));
        assert!(!browser.is_open());

        assert!(browser.open(true));
        assert_eq!(browser.view(), &MonitorView::FileList);
        assert_eq!(browser.current_category(), "Research Papers");
        assert_eq!(browser.files().len(), 2);
        assert_eq!(browser.files()[1].document, None);
    }

    #[test]
    fn test_unknown_category_gives_empty_list() {
        let mut browser = browser();
        assert!(browser.show_category("Nope").is_err());
        assert!(browser.files().is_empty());
        assert_eq!(browser.view(), &MonitorView::FileList);
    }

    #[test]
    fn test_document_without_pages_returns_to_list() {
        let mut browser = browser();
        browser.open(true);
        let generation = browser.list_generation();

        let err = browser.open_document("Missing", "MonitorContent/none").unwrap_err();
        assert!(matches!(err, ContentError::NoPages(_)));
        assert_eq!(browser.view(), &MonitorView::FileList);
        assert!(browser.list_generation() > generation);
    }

    #[test]
    fn test_close_from_any_state() {
        let mut browser = browser();
        browser.open(true);
        browser.close();
        assert!(!browser.is_open());
        assert_eq!(browser.next_page(1.0), None);
    }

    #[test]
    fn test_browser_without_index() {
        let mut browser = MonitorBrowser::new("assets", None, &MonitorConfig::default());
        assert!(browser.category_names().is_empty());
        assert!(browser.open(true));
        assert!(browser.files().is_empty());
    }
}
