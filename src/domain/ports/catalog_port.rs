//! Product data supplier port definition.

use async_trait::async_trait;

use crate::domain::entities::Product;
use crate::domain::errors::CatalogError;

/// One page request into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Index of the first product to return.
    pub offset: usize,
    /// Maximum number of products to return.
    pub limit: usize,
}

impl PageRequest {
    /// First page of `limit` products.
    #[must_use]
    pub const fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Page following one that ended at `offset`.
    #[must_use]
    pub const fn after(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// A page of products in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Whether more products exist after this page.
    pub has_more: bool,
}

/// Port for fetching products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches one page of products.
    async fn fetch_page(&self, request: PageRequest) -> Result<ProductPage, CatalogError>;
}
