//! Domain types for product image loading.

use std::sync::Arc;

/// Status of a card's image while the card is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Load requested, waiting for the loader.
    #[default]
    Loading,
    /// Image decoded and ready for display.
    Ready,
    /// Load failed. Not retried while the card stays mounted.
    Failed(String),
}

impl ImageStatus {
    /// Returns true if the image is ready for rendering.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if the image is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Where an image was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Loaded from in-memory LRU cache.
    MemoryCache,
    /// Read from the local filesystem.
    File,
    /// Downloaded over HTTP.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::File => write!(f, "file"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Image URI as given by the product.
    pub url: String,
    /// Decoded pixels.
    pub image: Arc<image::DynamicImage>,
    /// Source of this copy.
    pub source: ImageSource,
}

impl LoadedImage {
    /// Pixel dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(ImageStatus::default().is_loading());
        assert!(ImageStatus::Ready.is_ready());
        assert!(ImageStatus::Failed("404".to_string()).is_failed());
        assert!(!ImageStatus::Failed("404".to_string()).is_loading());
    }

    #[test]
    fn test_loaded_image_dimensions() {
        let loaded = LoadedImage {
            url: "file.png".to_string(),
            image: Arc::new(image::DynamicImage::new_rgb8(4, 3)),
            source: ImageSource::File,
        };
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.source.to_string(), "file");
    }
}
