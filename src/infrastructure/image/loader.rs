//! Async product image loading.
//!
//! Checks the memory cache, then reads the URI from the network or the
//! local filesystem and decodes off the async runtime.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, warn};

use crate::domain::entities::{ImageSource, LoadedImage};
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageLoaderPort;

use super::memory_cache::MemoryImageCache;

/// Decoded images wider than this are downscaled before caching.
const MAX_DECODED_WIDTH: u32 = 400;
const MAX_DECODED_HEIGHT: u32 = 300;

/// Message sent when a queued load finishes.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// Ticket given to [`ImageLoaderPort::request`].
    pub ticket: u64,
    /// The requested URI.
    pub url: String,
    pub result: Result<LoadedImage, ImageError>,
}

/// Configuration for the image loader.
#[derive(Debug, Clone)]
pub struct ImageLoaderConfig {
    /// Maximum images in memory cache.
    pub memory_cache_size: usize,
    /// Maximum concurrent loads.
    pub max_concurrent_downloads: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: 50,
            max_concurrent_downloads: 4,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug)]
enum LoaderCommand {
    Load { ticket: u64, url: String },
    Cancel { ticket: u64 },
    CancelAll,
}

/// Where the bytes of an image URI live.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageLocation {
    Remote(String),
    Local(PathBuf),
}

impl ImageLocation {
    fn parse(url: &str) -> Result<Self, ImageError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ImageError::UnsupportedUri(url.to_string()));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Self::Remote(trimmed.to_string()));
        }
        if let Some(path) = trimmed.strip_prefix("file://") {
            return Ok(Self::Local(PathBuf::from(path)));
        }
        if trimmed.contains("://") {
            return Err(ImageError::UnsupportedUri(url.to_string()));
        }
        Ok(Self::Local(PathBuf::from(trimmed)))
    }
}

/// Shared state used by direct loads and the background worker.
struct LoaderHandle {
    memory_cache: MemoryImageCache,
    http_client: reqwest::Client,
}

impl LoaderHandle {
    async fn load_image(&self, url: &str) -> Result<LoadedImage, ImageError> {
        if let Some(img) = self.memory_cache.get(url).await {
            return Ok(LoadedImage {
                url: url.to_string(),
                image: img,
                source: ImageSource::MemoryCache,
            });
        }

        let (bytes, source) = match ImageLocation::parse(url)? {
            ImageLocation::Remote(remote) => {
                debug!(url = %remote, "Downloading image");
                (self.download(&remote).await?, ImageSource::Network)
            }
            ImageLocation::Local(path) => {
                debug!(path = %path.display(), "Reading local image");
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| ImageError::Io(format!("{}: {e}", path.display())))?;
                (bytes, ImageSource::File)
            }
        };

        let decoded = tokio::task::spawn_blocking(move || decode(&bytes))
            .await
            .map_err(|e| ImageError::Decode(format!("Decode task panicked: {e}")))??;

        let img = Arc::new(decoded);
        self.memory_cache.put(url, img.clone()).await;

        debug!(url, source = %source, "Image loaded");

        Ok(LoadedImage {
            url: url.to_string(),
            image: img,
            source,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ImageError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::Network(format!("Failed to read body: {e}")))?;

        Ok(bytes.to_vec())
    }
}

fn decode(bytes: &[u8]) -> Result<image::DynamicImage, ImageError> {
    let img = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

    if img.width() > MAX_DECODED_WIDTH {
        Ok(img.resize(
            MAX_DECODED_WIDTH,
            MAX_DECODED_HEIGHT,
            image::imageops::FilterType::Lanczos3,
        ))
    } else {
        Ok(img)
    }
}

/// Loads product images from memory, network and disk.
///
/// Queued loads run on a background worker bounded by
/// `max_concurrent_downloads`; results arrive as [`ImageLoadedEvent`]s.
pub struct ImageLoader {
    handle: Arc<LoaderHandle>,
    request_tx: mpsc::UnboundedSender<LoaderCommand>,
    config: ImageLoaderConfig,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader and spawns its worker on the current runtime.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        config: ImageLoaderConfig,
        event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> Result<Self, ImageError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageError::Network(format!("Failed to create HTTP client: {e}")))?;

        let handle = Arc::new(LoaderHandle {
            memory_cache: MemoryImageCache::new(config.memory_cache_size),
            http_client,
        });

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads.max(1)));

        tokio::spawn(run_worker_loop(
            handle.clone(),
            request_rx,
            event_tx,
            semaphore,
        ));

        Ok(Self {
            handle,
            request_tx,
            config,
        })
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn memory_cache_stats(&self) -> super::memory_cache::CacheStats {
        self.handle.memory_cache.stats()
    }
}

impl ImageLoaderPort for ImageLoader {
    /// The result is sent on the event channel with `ticket`.
    fn request(&self, ticket: u64, url: String) {
        if let Err(e) = self.request_tx.send(LoaderCommand::Load { ticket, url }) {
            error!("Failed to send load request: {}", e);
        }
    }

    fn cancel(&self, ticket: u64) {
        if let Err(e) = self.request_tx.send(LoaderCommand::Cancel { ticket }) {
            error!("Failed to send cancel request: {}", e);
        }
    }

    fn cancel_all(&self) {
        if let Err(e) = self.request_tx.send(LoaderCommand::CancelAll) {
            error!("Failed to send cancel all request: {}", e);
        }
    }
}

async fn run_worker_loop(
    handle: Arc<LoaderHandle>,
    mut request_rx: mpsc::UnboundedReceiver<LoaderCommand>,
    event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
    semaphore: Arc<Semaphore>,
) {
    let mut queue: VecDeque<(u64, String)> = VecDeque::new();

    loop {
        tokio::select! {
            cmd = request_rx.recv() => {
                match cmd {
                    Some(LoaderCommand::Load { ticket, url }) => {
                        if !queue.iter().any(|(queued, _)| *queued == ticket) {
                            queue.push_back((ticket, url));
                        }
                    }
                    Some(LoaderCommand::Cancel { ticket }) => {
                        queue.retain(|(queued, _)| *queued != ticket);
                    }
                    Some(LoaderCommand::CancelAll) => queue.clear(),
                    None => break,
                }
            }
            Ok(permit) = semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                if let Some((ticket, url)) = queue.pop_front() {
                    let handle = handle.clone();
                    let event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        let result = handle.load_image(&url).await;
                        if let Err(e) = &result {
                            warn!(ticket, url = %url, error = %e, "Image load failed");
                        }
                        let _ = event_tx.send(ImageLoadedEvent { ticket, url, result });
                        drop(permit);
                    });
                }
            }
        }
    }

    debug!("Image loader worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn loader() -> (ImageLoader, mpsc::UnboundedReceiver<ImageLoadedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = ImageLoader::new(ImageLoaderConfig::default(), tx).expect("loader");
        (loader, rx)
    }

    fn write_png(dir: &tempfile::TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        image::DynamicImage::new_rgb8(6, 4)
            .save(&path)
            .expect("write png");
        path.to_string_lossy().into_owned()
    }

    #[test_case("https://fakestoreapi.com/img/a.jpg", true ; "https")]
    #[test_case("http://localhost/a.png", true ; "http")]
    #[test_case("/tmp/a.png", false ; "absolute path")]
    #[test_case("file:///tmp/a.png", false ; "file scheme")]
    fn test_location_parse(url: &str, remote: bool) {
        let location = ImageLocation::parse(url).expect("supported");
        assert_eq!(matches!(location, ImageLocation::Remote(_)), remote);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("ftp://host/a.png" ; "ftp")]
    fn test_location_rejects(url: &str) {
        assert!(matches!(
            ImageLocation::parse(url),
            Err(ImageError::UnsupportedUri(_))
        ));
    }

    #[tokio::test]
    async fn test_local_file_then_memory_cache() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let url = write_png(&dir, "card.png");
        let (loader, _rx) = loader();

        let first = loader.handle.load_image(&url).await.expect("first load");
        assert_eq!(first.source, ImageSource::File);
        assert_eq!(first.dimensions(), (6, 4));

        let second = loader.handle.load_image(&url).await.expect("second load");
        assert_eq!(second.source, ImageSource::MemoryCache);
        assert_eq!(loader.memory_cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let url = dir.path().join("absent.png").to_string_lossy().into_owned();
        let (loader, _rx) = loader();

        assert!(matches!(loader.handle.load_image(&url).await, Err(ImageError::Io(_))));
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_to_decode() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").expect("write");
        let (loader, _rx) = loader();

        let result = loader.handle.load_image(&path.to_string_lossy()).await;
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[tokio::test]
    async fn test_request_reports_ticket() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let url = write_png(&dir, "queued.png");
        let (loader, mut rx) = loader();

        loader.request(7, url.clone());
        loader.request(8, String::new());

        let mut events = vec![
            rx.recv().await.expect("event"),
            rx.recv().await.expect("event"),
        ];
        events.sort_by_key(|event| event.ticket);

        assert_eq!(events[0].ticket, 7);
        assert_eq!(events[0].url, url);
        assert!(events[0].result.is_ok());
        assert!(matches!(
            events[1].result,
            Err(ImageError::UnsupportedUri(_))
        ));
    }
}
