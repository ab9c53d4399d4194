mod auth_port;
mod catalog_port;
mod image_loader_port;

pub use auth_port::AuthPort;
pub use catalog_port::{CatalogPort, PageRequest, ProductPage};
pub use image_loader_port::ImageLoaderPort;

#[cfg(test)]
pub mod mocks {
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::catalog_port::MockCatalogPort;
    pub use super::image_loader_port::MockImageLoaderPort;
}
