//! Product page loading use case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::CatalogError;
use crate::domain::ports::{CatalogPort, PageRequest, ProductPage};

/// Fetches product pages from the configured supplier.
#[derive(Clone)]
pub struct LoadProductsUseCase {
    catalog: Arc<dyn CatalogPort>,
}

impl LoadProductsUseCase {
    #[must_use]
    pub const fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetches one page.
    ///
    /// # Errors
    /// Returns error if the supplier cannot produce the page.
    pub async fn execute(&self, request: PageRequest) -> Result<ProductPage, CatalogError> {
        debug!(offset = request.offset, limit = request.limit, "Fetching product page");
        match self.catalog.fetch_page(request).await {
            Ok(page) => {
                debug!(
                    count = page.products.len(),
                    has_more = page.has_more,
                    "Fetched product page"
                );
                Ok(page)
            }
            Err(e) => {
                warn!(error = %e, offset = request.offset, "Failed to fetch product page");
                Err(e)
            }
        }
    }
}
