//! Built-in rules.
//!
//! Every rule is a pure predicate over `(value, params)` plus an English
//! default template; locale tables override the template per language.
//!
//! # Categories
//!
//! - **Presence**: `required`, `filled`, `accepted`
//! - **Logical**: `boolean`
//! - **Content**: `email`, `url`, `pattern`, `alpha`, `alpha_num`, `alpha_dash`, `json`, `uuid`
//! - **Measure**: `numeric`, `min`, `max`, `between`, `size`
//! - **Choice**: `in`
//! - **Network**: `ip`, `ipv4`, `ipv6`
//! - **Time**: `date`, `before`, `after`
//! - **Upload**: `file`, `image`
//! - **Cross-field**: `confirmed`, `same`, `different`
//!
//! The cross-field rules only carry templates. Their outcome depends on a
//! sibling field, so the validator evaluates them itself.

pub mod boolean;
pub mod choice;
pub mod content;
pub mod cross_field;
pub mod ip_address;
pub mod measure;
pub mod presence;
pub mod time;
pub mod upload;

pub use boolean::Boolean;
pub use choice::In;
pub use content::{Alpha, AlphaDash, AlphaNum, Email, Json, Pattern, Url, Uuid};
pub use cross_field::{Confirmed, Different, Same};
pub use ip_address::{Ip, Ipv4, Ipv6};
pub use measure::{Between, Max, Min, Numeric, Size};
pub use presence::{Accepted, Filled, Required};
pub use time::{After, Before, Date};
pub use upload::{File, Image};

use crate::registry::RuleRegistry;

/// Registers every built-in rule into `registry`.
pub fn register_builtins(registry: &mut RuleRegistry) {
    registry
        .register_named(Required)
        .register_named(Filled)
        .register_named(Accepted)
        .register_named(Boolean)
        .register_named(Email)
        .register_named(Url)
        .register_named(Numeric)
        .register_named(Min)
        .register_named(Max)
        .register_named(Between)
        .register_named(Size)
        .register_named(In)
        .register_named(Pattern)
        .register_named(Alpha)
        .register_named(AlphaNum)
        .register_named(AlphaDash)
        .register_named(Json)
        .register_named(Uuid)
        .register_named(Ip)
        .register_named(Ipv4)
        .register_named(Ipv6)
        .register_named(Date)
        .register_named(Before)
        .register_named(After)
        .register_named(File)
        .register_named(Image)
        .register_named(Confirmed)
        .register_named(Same)
        .register_named(Different);
}

/// Parses the parameter at `index` as a number.
pub(crate) fn param_f64(params: &[String], index: usize) -> Option<f64> {
    params.get(index).and_then(|p| p.trim().parse::<f64>().ok())
}
