mod button;
mod input;
mod product_card;
mod product_grid;
mod stars;
mod status_bar;
mod virtual_window;

pub use button::{BUTTON_HEIGHT, PrimaryButton, PrimaryButtonStyle};
pub use input::{FIELD_HEIGHT, TextInput, TextInputField, TextInputStyle};
pub use product_card::{
    ADD_TO_CART_LABEL, AccessibilityInfo, CardFocus, CardHit, CardImageState, CardLayout,
    IMAGE_UNAVAILABLE, ProductCard, ProductCardStyle,
};
pub use product_grid::{
    EMPTY_MESSAGE, GridProps, GridState, ImageRequest, LOADING_MORE_MESSAGE, ProductGrid,
    ProductGridAction, ProductGridStyle, REFRESHING_MESSAGE, column_width,
};
pub use stars::{EMPTY_STAR, FILLED_STAR, StarStyle, render_stars};
pub use status_bar::{StatusBar, StatusLevel, StatusMessage};
pub use virtual_window::{COLUMNS, Viewport, VirtualWindow};
