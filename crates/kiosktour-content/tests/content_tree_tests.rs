//! Content tree tests
//!
//! These tests build a small asset folder on disk (under the system temp dir) and read it
//! back the same way the kiosk does at runtime.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use kiosktour_content::{
    discover_pages, first_page_aspect_ratio, require_pages, ComponentCatalog, ContentError,
    LayoutConfig, MonitorIndex, ScreenFit,
};

static NEXT_FIXTURE: AtomicUsize = AtomicUsize::new(0);

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let n = NEXT_FIXTURE.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "kiosktour-content-{}-{}-{}",
            name,
            std::process::id(),
            n
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).expect("create fixture root");
        Self { root }
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn image(&self, rel: &str, width: u32, height: u32) {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::new(width, height)
            .save(&path)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    }

    fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn test_pages_are_discovered_in_order_until_first_gap() {
    let fx = Fixture::new("gap");
    fx.image("MonitorContent/Research/wiring/page_001.png", 8, 10);
    fx.image("MonitorContent/Research/wiring/page_002.jpg", 8, 10);
    fx.image("MonitorContent/Research/wiring/page_003.png", 8, 10);
    // page_004 missing, page_005 must not be picked up
    fx.image("MonitorContent/Research/wiring/page_005.png", 8, 10);

    let pages = discover_pages(fx.path(), "MonitorContent/Research/wiring");
    let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(
        pages[1].asset_path,
        "MonitorContent/Research/wiring/page_002.jpg"
    );
}

#[test]
fn test_trailing_slash_in_document_path_is_ignored() {
    let fx = Fixture::new("slash");
    fx.image("MonitorContent/ECAD/main/page_001.png", 4, 4);

    let pages = discover_pages(fx.path(), "MonitorContent/ECAD/main/");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].asset_path, "MonitorContent/ECAD/main/page_001.png");
}

#[test]
fn test_document_without_first_page_has_no_pages() {
    let fx = Fixture::new("nofirst");
    fx.image("MonitorContent/odd/page_002.png", 4, 4);

    assert!(discover_pages(fx.path(), "MonitorContent/odd").is_empty());
    assert!(matches!(
        require_pages(fx.path(), "MonitorContent/odd"),
        Err(ContentError::NoPages(doc)) if doc == "MonitorContent/odd"
    ));
}

#[test]
fn test_first_page_aspect_drives_layout() {
    let fx = Fixture::new("layout");
    fx.image("MonitorContent/slides/page_001.png", 32, 18);
    fx.image("MonitorContent/paper/page_001.png", 21, 30);

    let config = LayoutConfig::default();

    let slides = config.choose(first_page_aspect_ratio(fx.path(), "MonitorContent/slides"));
    assert_eq!(slides.fit, ScreenFit::FullSize);

    let paper = config.choose(first_page_aspect_ratio(fx.path(), "MonitorContent/paper"));
    assert_eq!(paper.fit, ScreenFit::Original);
    assert!((paper.aspect_ratio - 0.7).abs() < 1e-4);
}

#[test]
fn test_load_index_and_catalog_from_disk() {
    let fx = Fixture::new("json");
    fx.write(
        "MonitorContent/monitorIndex.json",
        r#"{ "categories": [ { "name": "General Info", "files": [
            { "title": "Safety", "resourcePath": "MonitorContent/General/safety" } ] } ] }"#,
    );
    fx.write(
        "ComponentMetadata/cabinetData.json",
        r#"{ "components": [ { "id": "PLC1", "name": "PLC", "description": "S7-1500",
            "imagePath": "images/plc.png", "ecadPath": "" } ] }"#,
    );

    let index = MonitorIndex::load_from_file(&MonitorIndex::default_path(fx.path())).unwrap();
    assert_eq!(index.category_names(), vec!["General Info"]);

    let catalog =
        ComponentCatalog::load_from_file(&ComponentCatalog::default_path(fx.path())).unwrap();
    assert_eq!(catalog.find("PLC1").unwrap().description, "S7-1500");
}

#[test]
fn test_missing_index_is_an_io_error() {
    let fx = Fixture::new("missing");
    let err = MonitorIndex::load_from_file(&MonitorIndex::default_path(fx.path())).unwrap_err();
    assert!(matches!(err, ContentError::Io { .. }));
}
