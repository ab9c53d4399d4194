//! Use case implementations.

mod load_products_use_case;
mod login_use_case;

pub use load_products_use_case::LoadProductsUseCase;
pub use login_use_case::LoginUseCase;
