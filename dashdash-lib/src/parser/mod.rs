pub mod css;

pub use css::parse_stylesheet;
