//! Monitor screen layout
//!
//! Landscape documents (slides, ECAD sheets) use the whole monitor; portrait pages keep
//! the authored screen rectangle and are aspect-fitted inside it.

use serde::{Deserialize, Serialize};

/// A4 portrait at 200 dpi.
pub const DEFAULT_PORTRAIT_ASPECT: f32 = 1654.0 / 2339.0;
pub const DEFAULT_LANDSCAPE_THRESHOLD: f32 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenFit {
    /// Bound the page by the whole monitor panel.
    FullSize,
    /// Keep the authored screen rectangle.
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub fit: ScreenFit,
    /// Width / height used to fit the page inside the chosen rectangle.
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub default_portrait_aspect: f32,
    pub landscape_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_portrait_aspect: DEFAULT_PORTRAIT_ASPECT,
            landscape_threshold: DEFAULT_LANDSCAPE_THRESHOLD,
        }
    }
}

impl LayoutConfig {
    /// Layout for a document whose first page has `first_page_aspect`
    /// (`None` when the first page could not be read).
    pub fn choose(&self, first_page_aspect: Option<f32>) -> ScreenLayout {
        match first_page_aspect.filter(|a| a.is_finite() && *a > 0.0) {
            Some(aspect) if aspect > self.landscape_threshold => ScreenLayout {
                fit: ScreenFit::FullSize,
                aspect_ratio: aspect,
            },
            Some(aspect) => ScreenLayout {
                fit: ScreenFit::Original,
                aspect_ratio: aspect,
            },
            None => ScreenLayout {
                fit: ScreenFit::Original,
                aspect_ratio: self.default_portrait_aspect,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_goes_full_size() {
        let layout = LayoutConfig::default().choose(Some(16.0 / 9.0));
        assert_eq!(layout.fit, ScreenFit::FullSize);
        assert!((layout.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_and_portrait_keep_original_rect() {
        let config = LayoutConfig::default();
        assert_eq!(config.choose(Some(1.0)).fit, ScreenFit::Original);
        assert_eq!(config.choose(Some(1.05)).fit, ScreenFit::Original);
        assert_eq!(config.choose(Some(0.7)).fit, ScreenFit::Original);
    }

    #[test]
    fn test_unreadable_first_page_uses_default_portrait() {
        let layout = LayoutConfig::default().choose(None);
        assert_eq!(layout.fit, ScreenFit::Original);
        assert!((layout.aspect_ratio - DEFAULT_PORTRAIT_ASPECT).abs() < 1e-6);

        let layout = LayoutConfig::default().choose(Some(0.0));
        assert!((layout.aspect_ratio - DEFAULT_PORTRAIT_ASPECT).abs() < 1e-6);
    }
}
