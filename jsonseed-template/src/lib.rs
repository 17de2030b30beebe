//! Placeholder expansion for jsonseed payload templates.
//!
//! A payload is a JSON document whose string members may carry tokens:
//!
//! | token | resolves to |
//! |-------|-------------|
//! | `$randBetween(min;max)` | uniform random integer in `[min, max]` |
//! | `$now` | local wall-clock timestamp |
//! | `$utcNow` | UTC timestamp |
//! | `$prop(name)` | text of sibling `name`, spliced into the surrounding string |
//!
//! Keywords are case-insensitive; property names are not.
//!
//! # Architecture
//!
//! - [`token`] recognizes one string into a [`Token`] and resolves it
//! - [`expand`] walks a value tree, feeding object members to the token layer
//! - [`TemplateSource`] reads a payload file once and expands it on demand
//! - [`Entropy`] supplies the clock and RNG so expansion is testable

mod entropy;
mod error;
pub mod expand;
mod source;
pub mod token;

pub use entropy::{Entropy, SeededEntropy, SystemEntropy};
pub use error::{TemplateError, TemplateResult};
pub use expand::expand;
pub use source::TemplateSource;
pub use token::{Token, recognize, resolve_value};
