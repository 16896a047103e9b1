//! Derive macros for focal optics.
//!
//! # Available Derive Macros
//!
//! - [`Lenses`]: Generates lens constructors for struct fields
//! - [`Prisms`]: Generates prism constructors for enum variants
//!
//! The generated code refers to `::focal::optics`, so the deriving crate must
//! depend on `focal`.
//!
//! # Example: Lenses
//!
//! ```rust,ignore
//! use focal::optics::Lens;
//! use focal_derive::Lenses;
//!
//! #[derive(Clone, Lenses)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! // Generated methods:
//! // - Point::x_lens() -> impl Lens<Point, i32>
//! // - Point::y_lens() -> impl Lens<Point, i32>
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::x_lens().get(&point), 10);
//! ```
//!
//! # Example: Prisms
//!
//! ```rust,ignore
//! use focal::optics::Optic;
//! use focal_derive::Prisms;
//!
//! #[derive(Clone, Prisms)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! // Generated methods:
//! // - Shape::circle_prism() -> impl Optic<Shape, f64>
//! // - Shape::rectangle_prism() -> impl Optic<Shape, (f64, f64)>
//!
//! let rect = Shape::Rectangle(3.0, 4.0);
//! assert_eq!(Shape::rectangle_prism().preview(&rect), Some((3.0, 4.0)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod lenses;
mod prisms;

use proc_macro::TokenStream;

/// Derive macro generating a lens constructor for each named field.
///
/// For each field `foo: T`, generates
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_lens() -> impl focal::optics::Lens<StructName, T> + Clone { ... }
/// }
/// ```
///
/// The focused field type must implement `Clone`, because lenses hand out
/// their focus by value.
///
/// # Example
///
/// ```rust,ignore
/// use focal::optics::{Lens, Optic};
/// use focal_derive::Lenses;
///
/// #[derive(Clone, Debug, PartialEq, Lenses)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let person = Person { name: "Alice".to_string(), age: 30 };
/// let updated = Person::name_lens().set(person, "Bob".to_string());
/// assert_eq!(updated.name, "Bob");
/// ```
#[proc_macro_derive(Lenses)]
pub fn derive_lenses(input: TokenStream) -> TokenStream {
    lenses::derive_lenses_impl(input)
}

/// Derive macro generating a prism constructor for each enum variant.
///
/// The method name is `{variant_name_snake_case}_prism()`.
///
/// - **Unit variants** focus on `()`
/// - **Single-field tuple variants** focus on the field type
/// - **Multi-field tuple variants** and **struct variants** focus on a tuple of
///   the field types, in definition order
///
/// `set` always rebuilds the variant from the new focus, whatever variant the
/// source held.
///
/// # Example
///
/// ```rust,ignore
/// use focal::optics::Optic;
/// use focal_derive::Prisms;
///
/// #[derive(Clone, Debug, PartialEq, Prisms)]
/// enum Event {
///     Click { x: i32, y: i32 },
///     Close,
/// }
///
/// let click = Event::Click { x: 10, y: 20 };
/// assert_eq!(Event::click_prism().preview(&click), Some((10, 20)));
/// assert_eq!(Event::close_prism().preview(&click), None);
/// ```
#[proc_macro_derive(Prisms)]
pub fn derive_prisms(input: TokenStream) -> TokenStream {
    prisms::derive_prisms_impl(input)
}
