//! Paginated product feed owned by the screen that supplies the grid.
//!
//! The grid only signals "refresh" and "load more"; this feed decides
//! whether a request is actually issued. Load-more signals arriving while
//! a request is in flight or after the last page are dropped here.

use tracing::{debug, trace};

use crate::domain::entities::Product;
use crate::domain::ports::{PageRequest, ProductPage};

/// Kind of fetch currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Initial load or pull-to-refresh; replaces the content.
    Refresh,
    /// Next page; appended to the content.
    LoadMore,
}

/// Products plus the request flags the grid renders from.
#[derive(Debug, Clone)]
pub struct CatalogFeed {
    products: Vec<Product>,
    page_size: usize,
    in_flight: Option<FetchKind>,
    exhausted: bool,
    loaded_once: bool,
}

impl CatalogFeed {
    /// Creates an empty feed fetching `page_size` products per page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            page_size: page_size.max(1),
            in_flight: None,
            exhausted: false,
            loaded_once: false,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// True while a next page is being fetched.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.in_flight, Some(FetchKind::LoadMore))
    }

    /// True while a refresh is in flight.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        matches!(self.in_flight, Some(FetchKind::Refresh))
    }

    /// True once the supplier reported no further pages.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Starts a refresh from the first page.
    ///
    /// Returns `None` if a refresh is already running. A refresh supersedes
    /// an in-flight load-more; its page is ignored when it arrives.
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        if self.is_refreshing() {
            trace!("Refresh already in flight");
            return None;
        }
        self.in_flight = Some(FetchKind::Refresh);
        Some(PageRequest::first(self.page_size))
    }

    /// Starts fetching the next page.
    ///
    /// Returns `None` when a request is in flight or the catalog is exhausted.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            trace!(in_flight = ?self.in_flight, "Ignoring load-more while fetching");
            return None;
        }
        if self.exhausted || !self.loaded_once {
            trace!(exhausted = self.exhausted, "Ignoring load-more");
            return None;
        }
        self.in_flight = Some(FetchKind::LoadMore);
        Some(PageRequest::after(self.products.len(), self.page_size))
    }

    /// Applies a page fetched for `kind`. Pages for a superseded fetch are dropped.
    ///
    /// Returns true if the content changed.
    pub fn apply_page(&mut self, kind: FetchKind, page: ProductPage) -> bool {
        if self.in_flight != Some(kind) {
            debug!(?kind, "Dropping page for superseded fetch");
            return false;
        }
        self.in_flight = None;
        self.exhausted = !page.has_more;
        self.loaded_once = true;

        let count = page.products.len();
        match kind {
            FetchKind::Refresh => self.products = page.products,
            FetchKind::LoadMore => {
                let known: std::collections::HashSet<_> =
                    self.products.iter().map(Product::id).collect();
                self.products.extend(
                    page.products
                        .into_iter()
                        .filter(|product| !known.contains(&product.id())),
                );
            }
        }

        debug!(?kind, count, total = self.products.len(), exhausted = self.exhausted, "Applied page");
        true
    }

    /// Clears the in-flight flag after a failed fetch for `kind`.
    pub fn fail(&mut self, kind: FetchKind) {
        if self.in_flight == Some(kind) {
            self.in_flight = None;
        }
    }
}
