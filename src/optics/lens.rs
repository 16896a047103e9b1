//! Lens optics for focusing on fields that are always present.
//!
//! A Lens is an [`Optic`] whose focus always exists, so it can `get` without
//! an `Option`.
//!
//! # Laws
//!
//! 1. **GetPut Law**: `lens.set(source.clone(), lens.get(&source)) == source`
//! 2. **PutGet Law**: `lens.get(&lens.set(source, value.clone())) == value`
//! 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
//!
//! # Examples
//!
//! ```
//! use focal::optics::{Lens, Optic};
//! use focal::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated, Point { x: 100, y: 20 });
//! ```

use std::marker::PhantomData;

use super::optic::Optic;

/// An optic whose focus is always present.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused field)
pub trait Lens<S, A>: Optic<S, A> {
    /// Reads the focused field.
    fn get(&self, source: &S) -> A;
}

/// A lens implemented using getter and setter functions.
///
/// The setter must rebuild the source with only the focused field replaced.
/// The `lens!` macro and `#[derive(Lenses)]` generate a `FunctionLens`.
///
/// # Example
///
/// ```
/// use focal::optics::{Lens, FunctionLens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |point: &Point| point.x,
///     |point: Point, x: i32| Point { x, ..point },
/// );
///
/// assert_eq!(x_lens.get(&Point { x: 10, y: 20 }), 10);
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    getter: G,
    setter: St,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Optic<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn preview(&self, source: &S) -> Option<A> {
        Some((self.getter)(source))
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Lens<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A + Clone,
    St: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.setter.clone())
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// Builds a lens from a getter and a setter.
///
/// ```
/// use focal::optics::{make_lens, view, set};
///
/// let first = make_lens(|pair: &(i32, char)| pair.0, |pair: (i32, char), value| (value, pair.1));
/// assert_eq!(view(&first, &(1, 'a')), 1);
/// assert_eq!(set(&first, 5, (1, 'a')), (5, 'a'));
/// ```
pub const fn make_lens<S, A, G, St>(getter: G, setter: St) -> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    FunctionLens::new(getter, setter)
}

/// Creates a lens for a struct field.
///
/// The field type must implement `Clone`.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use focal::optics::{Lens, Optic};
/// use focal::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let y_lens = lens!(Point, y);
/// let doubled = y_lens.modify(Point { x: 1, y: 2 }, |y| y * 2);
/// assert_eq!(doubled, Point { x: 1, y: 4 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type<$($generic),+>| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type<$($generic),+>, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
