//! Storefront product entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating in `[0, 5]`.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl Rating {
    /// Highest possible rating.
    pub const MAX: f64 = 5.0;

    /// Creates a rating, clamping `rate` into `[0, 5]`.
    #[must_use]
    pub fn new(rate: f64, count: u32) -> Self {
        let rate = if rate.is_finite() {
            rate.clamp(0.0, Self::MAX)
        } else {
            0.0
        };
        Self { rate, count }
    }
}

/// Read-only display record for one storefront item.
///
/// Fields are private; once a product is built nothing in the UI can change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: f64,
    image: String,
    rating: Rating,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
}

impl Product {
    /// Creates a product with the required display fields.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            rating,
            description: String::new(),
            category: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Price formatted for display, e.g. `$109.95` or `$695`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }

    /// Image URI.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
pub mod fixtures {
    //! Sample catalog used by tests.

    use super::{Product, Rating};

    /// Returns the six-item sample catalog.
    #[must_use]
    pub fn sample_products() -> Vec<Product> {
        vec![
            Product::new(
                1,
                "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
                109.95,
                "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
                Rating::new(3.9, 120),
            )
            .with_description("Your perfect pack for everyday use and walks in the forest.")
            .with_category("men's clothing"),
            Product::new(
                2,
                "Mens Casual Premium Slim Fit T-Shirts",
                22.3,
                "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
                Rating::new(4.1, 259),
            )
            .with_description("Slim-fitting style, contrast raglan long sleeve.")
            .with_category("men's clothing"),
            Product::new(
                3,
                "Mens Cotton Jacket",
                55.99,
                "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
                Rating::new(4.7, 500),
            )
            .with_description("Great outerwear jackets for Spring/Autumn/Winter.")
            .with_category("men's clothing"),
            Product::new(
                4,
                "Mens Casual Slim Fit",
                15.99,
                "https://fakestoreapi.com/img/71YXzeOuslL._AC_UY879_.jpg",
                Rating::new(2.1, 430),
            )
            .with_description("The color could be slightly different between on the screen.")
            .with_category("men's clothing"),
            Product::new(
                5,
                "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet",
                695.0,
                "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ml3_.jpg",
                Rating::new(4.6, 400),
            )
            .with_description(
                "From our Legends Collection, the Naga was inspired by the mythical water dragon.",
            )
            .with_category("jewelry"),
            Product::new(
                6,
                "Solid Gold Petite Micropave",
                168.0,
                "https://fakestoreapi.com/img/61sbMiUnoGL._AC_UL640_QL65_ml3_.jpg",
                Rating::new(3.9, 70),
            )
            .with_description(
                "Satisfaction Guaranteed. Return or exchange any order within 30 days.",
            )
            .with_category("jewelry"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price_matches_storefront_format() {
        let products = fixtures::sample_products();
        assert_eq!(products[0].display_price(), "$109.95");
        assert_eq!(products[1].display_price(), "$22.3");
        assert_eq!(products[4].display_price(), "$695");
    }

    #[test]
    fn test_rating_is_clamped() {
        assert!((Rating::new(7.0, 1).rate - 5.0).abs() < f64::EPSILON);
        assert!(Rating::new(-1.0, 1).rate.abs() < f64::EPSILON);
        assert!(Rating::new(f64::NAN, 1).rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_fakestore_shape() {
        let json = r#"{
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "image": "https://example.com/jacket.jpg",
            "rating": { "rate": 4.7, "count": 500 },
            "description": "Great outerwear jackets.",
            "category": "men's clothing"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id(), ProductId(3));
        assert_eq!(product.title(), "Mens Cotton Jacket");
        assert_eq!(product.rating().count, 500);
        assert_eq!(product.category(), "men's clothing");
    }

    #[test]
    fn test_deserialize_without_optional_text() {
        let json = r#"{"id":9,"title":"Mug","price":4,"image":"mug.png","rating":{"rate":0,"count":0}}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description().is_empty());
        assert_eq!(product.display_price(), "$4");
    }
}
