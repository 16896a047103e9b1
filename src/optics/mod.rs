//! Optics for immutable data manipulation.
//!
//! This module provides optics - composable accessors for immutable
//! data structures. Optics allow you to focus on specific parts of a data
//! structure, enabling type-safe reading and updating of deeply nested fields.
//!
//! # Optics Hierarchy
//!
//! ```text
//! Iso <: Lens <: Optic
//! ```
//!
//! An [`Optic`] that is not a [`Lens`] is a prism: its focus may be absent.
//!
//! # Available Optics
//!
//! - [`Lens`]: Focus on a field that is always present (get/set access)
//! - prisms ([`FunctionPrism`], [`json_text`], ...): Focus on something that
//!   may be absent (preview/set access)
//! - [`Iso`]: Isomorphism between types (bidirectional conversion)
//! - [`Path`]: A deferred chain of JSON member/index steps and spliced optics
//!
//! # Example with Lens
//!
//! ```
//! use focal::optics::{Lens, Optic};
//! use focal::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! // Create lenses using the macro
//! let address_lens = lens!(Person, address);
//! let street_lens = lens!(Address, street);
//!
//! // Compose lenses to focus on nested fields
//! let person_street = address_lens.compose(street_lens);
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(person_street.get(&person), "Main St");
//!
//! // Set nested field (returns new structure)
//! let updated = person_street.set(person, "Oak Ave".to_string());
//! assert_eq!(updated.address.street, "Oak Ave");
//! assert_eq!(updated.address.city, "Tokyo");
//! ```
//!
//! # Example with JSON
//!
//! ```
//! use focal::optics::{Optic, json_text, prop};
//! use serde_json::json;
//!
//! // "parse this string as JSON, set a field inside it, re-serialize"
//! let theme = json_text().compose(prop("theme"));
//!
//! let updated = theme.set(r#"{"theme":"light"}"#.to_string(), json!("dark"));
//! assert_eq!(updated, r#"{"theme":"dark"}"#);
//!
//! assert_eq!(theme.preview(&"not json".to_string()), None);
//! ```

mod iso;
pub mod json;
mod lens;
mod optic;
mod path;
mod prism;
mod standard_optics;

pub use optic::ComposedOptic;
pub use optic::Optic;
pub use optic::{compose, over, preview, set, view};

pub use lens::FunctionLens;
pub use lens::Lens;
pub use lens::make_lens;

pub use prism::FunctionPrism;
pub use prism::make_prism;

pub use iso::FunctionIso;
pub use iso::Iso;
pub use iso::ReversedIso;
pub use iso::make_iso;

pub use json::{
    IndexLens, MAX_PADDED_INDEX, PropLens, index, json_bytes, json_iso, json_text, parsed_json, prop,
};

pub use path::{Partial, Path, PathError, Total};

// Re-export standard optics
pub use standard_optics::{FileName, file_name, identity};
