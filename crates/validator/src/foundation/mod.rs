//! Foundation types shared by every other module.
//!
//! - **Values**: [`Value`], [`UploadedFile`], [`Data`]
//! - **Rules**: the [`Rule`] predicate trait and [`NamedRule`] for built-ins
//! - **Errors**: [`ConfigError`] and the crate [`Result`] alias

pub mod error;
pub mod traits;
pub mod value;

pub use error::{ConfigError, Result};
pub use traits::{NamedRule, Rule};
pub use value::{Data, UploadedFile, Value};
