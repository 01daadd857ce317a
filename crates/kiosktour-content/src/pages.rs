//! Page image discovery
//!
//! A document is a folder of pre-rendered page images named `page_001`, `page_002`, ...
//! Pages are checked in order until the first missing number, so a gap ends the document.

use std::path::{Path, PathBuf};

use crate::error::{ContentError, ContentResult};

/// Extensions tried for every page, in order.
pub const PAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Page numbers are three digits wide.
pub const MAX_PAGES: u32 = 999;

/// One discovered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// 1-based page number.
    pub number: u32,
    /// Path on disk.
    pub path: PathBuf,
    /// Path relative to the asset root, with forward slashes (what the asset server loads).
    pub asset_path: String,
}

/// File stem for a 1-based page number (`3` -> `page_003`).
pub fn page_stem(number: u32) -> String {
    format!("page_{:03}", number)
}

/// Locate one page of a document below `asset_root`, trying every known extension.
pub fn find_page(asset_root: &Path, document: &str, number: u32) -> Option<PageRef> {
    let stem = page_stem(number);
    let document = document.trim_matches('/');
    for ext in PAGE_EXTENSIONS {
        let asset_path = format!("{}/{}.{}", document, stem, ext);
        let path = asset_root.join(&asset_path);
        if path.is_file() {
            return Some(PageRef {
                number,
                path,
                asset_path,
            });
        }
    }
    None
}

/// All consecutive pages starting at `page_001`. May be empty.
pub fn discover_pages(asset_root: &Path, document: &str) -> Vec<PageRef> {
    let mut pages = Vec::new();
    let mut number = 1;
    while number <= MAX_PAGES {
        let Some(page) = find_page(asset_root, document, number) else {
            break;
        };
        pages.push(page);
        number += 1;
    }
    pages
}

/// Like [`discover_pages`] but an empty document is an error.
pub fn require_pages(asset_root: &Path, document: &str) -> ContentResult<Vec<PageRef>> {
    let pages = discover_pages(asset_root, document);
    if pages.is_empty() {
        return Err(ContentError::NoPages(document.to_string()));
    }
    Ok(pages)
}

/// Width / height of an image file, read from its header.
pub fn image_aspect_ratio(path: &Path) -> ContentResult<f32> {
    let (width, height) = image::image_dimensions(path).map_err(|source| ContentError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    if height == 0 {
        return Ok(0.0);
    }
    Ok(width as f32 / height as f32)
}

/// Aspect ratio of a document's first page, if that page exists and can be read.
pub fn first_page_aspect_ratio(asset_root: &Path, document: &str) -> Option<f32> {
    let page = find_page(asset_root, document, 1)?;
    image_aspect_ratio(&page.path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_stem_is_zero_padded() {
        assert_eq!(page_stem(1), "page_001");
        assert_eq!(page_stem(42), "page_042");
        assert_eq!(page_stem(999), "page_999");
    }

    #[test]
    fn test_missing_document_has_no_pages() {
        let root = Path::new("/definitely/not/a/kiosk/root");
        assert!(discover_pages(root, "MonitorContent/none").is_empty());
        assert!(matches!(
            require_pages(root, "MonitorContent/none"),
            Err(ContentError::NoPages(_))
        ));
        assert_eq!(first_page_aspect_ratio(root, "MonitorContent/none"), None);
    }
}
