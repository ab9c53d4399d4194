//! Product catalog backed by a JSON file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::entities::Product;
use crate::domain::errors::CatalogError;
use crate::domain::ports::{CatalogPort, PageRequest, ProductPage};

/// Reads a JSON array of products and serves it in pages.
///
/// The file is re-read on every first-page request so a refresh picks up
/// edits made while the app is running.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_products(&self) -> Result<Vec<Product>, CatalogError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(CatalogError::NotFound {
                path: self.path.display().to_string(),
            });
        }

        let content = tokio::fs::read(&self.path).await?;
        let products: Vec<Product> = serde_json::from_slice(&content)?;

        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|p| !seen.insert(p.id())) {
            return Err(CatalogError::DuplicateId {
                id: duplicate.id().as_u64(),
            });
        }

        if products.is_empty() {
            info!(path = %self.path.display(), "Catalog is empty");
        }
        Ok(products)
    }
}

#[async_trait]
impl CatalogPort for JsonFileCatalog {
    async fn fetch_page(&self, request: PageRequest) -> Result<ProductPage, CatalogError> {
        let products = self.read_products().await?;
        let total = products.len();

        let page: Vec<Product> = products
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect();
        let end = request.offset.saturating_add(page.len());

        debug!(
            path = %self.path.display(),
            offset = request.offset,
            returned = page.len(),
            total,
            "Served catalog page"
        );

        Ok(ProductPage {
            products: page,
            has_more: end < total,
        })
    }
}
