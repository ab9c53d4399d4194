//! Port definition for product image loading.

/// Port for queueing product image loads.
///
/// Results arrive asynchronously, tagged with the `ticket` passed to
/// [`request`](Self::request). Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
pub trait ImageLoaderPort: Send + Sync {
    /// Queues a load of `url`.
    fn request(&self, ticket: u64, url: String);

    /// Drops a queued load that has not started yet.
    fn cancel(&self, ticket: u64);

    /// Drops every queued load.
    fn cancel_all(&self);
}
