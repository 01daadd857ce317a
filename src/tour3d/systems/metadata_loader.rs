//! Component catalog loader
//!
//! Looks up a component in the catalog and decodes its preview and ECAD images on a
//! background thread. The catalog can be a local file or an http(s) URL. Finished loads
//! are handed back through a shared queue and turned into Bevy textures by
//! `process_component_info_loads`.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use kiosktour_content::{resolve_catalog_relative, ComponentCatalog, ComponentMetadata, ContentError};
use thiserror::Error;

use crate::tour3d::types::*;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the component catalog lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` values are URLs, anything else is a path relative to
    /// `asset_root` (absolute paths are kept).
    pub fn from_arg(value: &str, asset_root: &Path) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            CatalogSource::Url(value.to_string())
        } else {
            CatalogSource::File(asset_root.join(value))
        }
    }

    /// Location of a catalog-relative image.
    pub fn image_location(&self, relative: &str) -> CatalogSource {
        match self {
            CatalogSource::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                CatalogSource::File(resolve_catalog_relative(dir, relative))
            }
            CatalogSource::Url(url) => {
                let base = url.rsplit_once('/').map_or(url.as_str(), |(base, _)| base);
                let relative = relative.trim_start_matches(['/', '\\']).replace('\\', "/");
                CatalogSource::Url(format!("{base}/{relative}"))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogFetchError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode image {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: image::ImageError,
    },
}

/// RGBA8 pixels decoded off the main thread
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Catalog lookup finished on the loader thread
#[derive(Debug)]
pub struct LoadedComponent {
    pub metadata: ComponentMetadata,
    pub preview: Option<DecodedImage>,
    pub ecad: Option<DecodedImage>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadedComponent),
    NotFound(String),
    CatalogFailed { id: String, error: String },
}

/// Component info ready for the detail panel
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview: Option<Handle<Image>>,
    pub has_ecad: bool,
    pub ecad: Option<Handle<Image>>,
}

/// Resource that owns the background catalog lookups
#[derive(Resource)]
pub struct ComponentInfoLoader {
    source: CatalogSource,
    /// Finished loads waiting to become textures
    completed: Arc<Mutex<Vec<LoadOutcome>>>,
    in_flight: usize,
    /// Latest info waiting to be shown
    pub ready: Option<ComponentInfo>,
}

impl ComponentInfoLoader {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            completed: Arc::new(Mutex::new(Vec::new())),
            in_flight: 0,
            ready: None,
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Start a lookup of `id` on a background thread.
    pub fn request(&mut self, id: &str) {
        self.in_flight += 1;

        let id = id.to_string();
        let source = self.source.clone();
        let completed = Arc::clone(&self.completed);

        thread::spawn(move || {
            let outcome = fetch_component(&source, &id);
            if let Ok(mut lock) = completed.lock() {
                lock.push(outcome);
            }
        });
    }

    fn take_completed(&self) -> Vec<LoadOutcome> {
        match self.completed.lock() {
            Ok(mut lock) => std::mem::take(&mut *lock),
            Err(_) => Vec::new(),
        }
    }
}

fn fetch_bytes(location: &CatalogSource) -> Result<Vec<u8>, CatalogFetchError> {
    match location {
        CatalogSource::File(path) => std::fs::read(path).map_err(|source| {
            CatalogFetchError::from(ContentError::Io {
                path: path.clone(),
                source,
            })
        }),
        CatalogSource::Url(url) => {
            let http = |source: reqwest::Error| CatalogFetchError::Http {
                url: url.clone(),
                source,
            };
            let response = reqwest::blocking::Client::new()
                .get(url)
                .timeout(HTTP_TIMEOUT)
                .send()
                .map_err(http)?;
            if !response.status().is_success() {
                return Err(CatalogFetchError::Status {
                    url: url.clone(),
                    status: response.status().as_u16(),
                });
            }
            Ok(response.bytes().map_err(http)?.to_vec())
        }
    }
}

/// Read and parse the catalog.
pub fn fetch_catalog(source: &CatalogSource) -> Result<ComponentCatalog, CatalogFetchError> {
    match source {
        CatalogSource::File(path) => Ok(ComponentCatalog::load_from_file(path)?),
        CatalogSource::Url(url) => {
            let bytes = fetch_bytes(source)?;
            let json = String::from_utf8_lossy(&bytes);
            Ok(ComponentCatalog::from_json_str(&json, Path::new(url))?)
        }
    }
}

/// Fetch and decode one catalog image.
pub fn fetch_image(location: &CatalogSource) -> Result<DecodedImage, CatalogFetchError> {
    let bytes = fetch_bytes(location)?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|source| CatalogFetchError::Decode {
            location: location.describe(),
            source,
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        data: rgba.into_raw(),
        width,
        height,
    })
}

fn fetch_optional_image(source: &CatalogSource, relative: &str, what: &str) -> Option<DecodedImage> {
    let location = source.image_location(relative);
    match fetch_image(&location) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Failed to load {} image: {}", what, e);
            None
        }
    }
}

/// Full lookup of one component (runs on the loader thread).
pub fn fetch_component(source: &CatalogSource, id: &str) -> LoadOutcome {
    let catalog = match fetch_catalog(source) {
        Ok(catalog) => catalog,
        Err(e) => {
            return LoadOutcome::CatalogFailed {
                id: id.to_string(),
                error: e.to_string(),
            }
        }
    };

    let Some(metadata) = catalog.find(id).cloned() else {
        return LoadOutcome::NotFound(id.to_string());
    };

    let preview = metadata
        .has_image()
        .then(|| fetch_optional_image(source, &metadata.image_path, "component"))
        .flatten();
    let ecad = metadata
        .has_ecad()
        .then(|| fetch_optional_image(source, &metadata.ecad_path, "ECAD"))
        .flatten();

    LoadOutcome::Loaded(LoadedComponent {
        metadata,
        preview,
        ecad,
    })
}

fn to_texture(decoded: DecodedImage) -> Image {
    Image::new(
        bevy::render::render_resource::Extent3d {
            width: decoded.width,
            height: decoded.height,
            depth_or_array_layers: 1,
        },
        bevy::render::render_resource::TextureDimension::D2,
        decoded.data,
        bevy::render::render_resource::TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}

/// Start a lookup for every `ShowComponentInfo` request.
pub fn request_component_info(
    mut requests: MessageReader<ShowComponentInfo>,
    mut loader: ResMut<ComponentInfoLoader>,
) {
    for request in requests.read() {
        if loader.is_loading() {
            debug!("Earlier lookup still running, the latest finished one is shown");
        }
        debug!(
            "Loading component '{}' from {}",
            request.component_id,
            loader.source().describe()
        );
        loader.request(&request.component_id);
    }
}

/// Turn finished lookups into textures and queue the latest one for display.
pub fn process_component_info_loads(
    mut loader: ResMut<ComponentInfoLoader>,
    mut images: ResMut<Assets<Image>>,
) {
    let completed = loader.take_completed();
    if completed.is_empty() {
        return;
    }

    for outcome in completed {
        loader.in_flight = loader.in_flight.saturating_sub(1);
        match outcome {
            LoadOutcome::Loaded(loaded) => {
                let metadata = loaded.metadata;
                loader.ready = Some(ComponentInfo {
                    has_ecad: metadata.has_ecad(),
                    preview: loaded.preview.map(|image| images.add(to_texture(image))),
                    ecad: loaded.ecad.map(|image| images.add(to_texture(image))),
                    id: metadata.id,
                    name: metadata.name,
                    description: metadata.description,
                });
            }
            LoadOutcome::NotFound(id) => {
                warn!("Component with ID '{}' not found in catalog", id);
            }
            LoadOutcome::CatalogFailed { id, error } => {
                error!("Failed to load component catalog for '{}': {}", id, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "kiosktour_loader_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_source_from_arg() {
        let root = Path::new("assets");
        assert_eq!(
            CatalogSource::from_arg("https://example.com/data/cabinetData.json", root),
            CatalogSource::Url("https://example.com/data/cabinetData.json".into())
        );
        assert_eq!(
            CatalogSource::from_arg("ComponentMetadata/cabinetData.json", root),
            CatalogSource::File(root.join("ComponentMetadata/cabinetData.json"))
        );
    }

    #[test]
    fn test_image_location_is_relative_to_catalog() {
        let file = CatalogSource::File(PathBuf::from("assets/ComponentMetadata/cabinetData.json"));
        assert_eq!(
            file.image_location("images/k1.png"),
            CatalogSource::File(PathBuf::from("assets/ComponentMetadata/images/k1.png"))
        );

        let url = CatalogSource::Url("https://example.com/meta/cabinetData.json".into());
        assert_eq!(
            url.image_location("\\images\\k1.png"),
            CatalogSource::Url("https://example.com/meta/images/k1.png".into())
        );
    }

    #[test]
    fn test_fetch_component_found_with_missing_images() {
        let dir = temp_dir("found");
        let catalog = dir.join("cabinetData.json");
        fs::write(
            &catalog,
            r#"{ "components": [ { "id": "K1", "name": "Relay", "description": "24V relay", "imagePath": "missing.png", "ecadPath": "" } ] }"#,
        )
        .unwrap();

        match fetch_component(&CatalogSource::File(catalog), "K1") {
            LoadOutcome::Loaded(loaded) => {
                assert_eq!(loaded.metadata.name, "Relay");
                assert!(loaded.preview.is_none());
                assert!(loaded.ecad.is_none());
                assert!(!loaded.metadata.has_ecad());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fetch_component_decodes_preview() {
        let dir = temp_dir("decode");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(dir.join("k2.png"))
            .unwrap();
        let catalog = dir.join("cabinetData.json");
        fs::write(
            &catalog,
            r#"{ "components": [ { "id": "K2", "imagePath": "k2.png" } ] }"#,
        )
        .unwrap();

        match fetch_component(&CatalogSource::File(catalog), "K2") {
            LoadOutcome::Loaded(loaded) => {
                let preview = loaded.preview.expect("preview decoded");
                assert_eq!((preview.width, preview.height), (4, 2));
                assert_eq!(preview.data.len(), 4 * 2 * 4);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fetch_component_not_found_and_missing_catalog() {
        let dir = temp_dir("missing");
        let catalog = dir.join("cabinetData.json");
        fs::write(&catalog, r#"{ "components": [] }"#).unwrap();

        assert!(matches!(
            fetch_component(&CatalogSource::File(catalog), "Q9"),
            LoadOutcome::NotFound(id) if id == "Q9"
        ));
        assert!(matches!(
            fetch_component(&CatalogSource::File(dir.join("nope.json")), "Q9"),
            LoadOutcome::CatalogFailed { .. }
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
