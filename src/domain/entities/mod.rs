//! Domain entity definitions.

mod cart;
mod credentials;
mod image;
pub mod product;

pub use cart::Cart;
pub use credentials::Credentials;
pub use self::image::{ImageSource, ImageStatus, LoadedImage};
pub use product::{Product, ProductId, Rating};
