//! Rewrites `--` shorthand selectors into rules whose declarations read from
//! CSS custom properties, falling back to the values written in the source.
//!
//! ```css
//! .card _-- { color: red; }
//! ```
//!
//! becomes
//!
//! ```css
//! .card { color: var(--card--color, red); }
//! ```

pub mod config;
pub mod dashdash_generate;
pub mod error;
pub mod parser;
pub mod serialize;
pub mod transform;
pub mod tree;

pub use config::{AliasTable, Options, PrefixOrder};
pub use error::{Error, Result};
pub use transform::{transform, TransformReport};
