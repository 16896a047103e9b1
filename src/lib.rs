//! # focal
//!
//! Composable optics for immutable updates to nested, JSON-like data.
//!
//! ## Overview
//!
//! - **Optics**: [`Lens`](optics::Lens), prisms, [`Iso`](optics::Iso) and
//!   their composition, plus JSON member/index lenses and a deferred
//!   [`Path`](optics::Path) builder
//! - **Storage**: [`SaveFileLens`](storage::SaveFileLens), an optic whose
//!   write side persists bytes under a fresh, timestamped name
//! - **Validation**: [`Validated`](validation::Validated) for error
//!   accumulation and the checks that gate a network fetch
//! - **Roster**: a parse → filter → reformat pipeline built on the optics
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Lenses)]` and `#[derive(Prisms)]`
//!
//! ## Example
//!
//! ```rust
//! use focal::prelude::*;
//! use serde_json::json;
//!
//! let street = Path::root().field("address").field("street");
//! let person = json!({"name": "Alice", "address": {"street": "Main St"}});
//!
//! assert_eq!(street.view(&person), json!("Main St"));
//! let moved = street.set(person, json!("Oak Ave"));
//! assert_eq!(moved["address"]["street"], "Oak Ave");
//! assert_eq!(moved["name"], "Alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use focal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::optics::*;

    pub use crate::storage::{ByteStore, SaveFileLens};
    pub use crate::validation::Validated;

    #[cfg(feature = "derive")]
    pub use focal_derive::{Lenses, Prisms};
}

pub mod config;
pub mod optics;
pub mod roster;
pub mod storage;
pub mod validation;

#[cfg(feature = "derive")]
pub use focal_derive::{Lenses, Prisms};
