//! Iso optics for lossless conversions between two representations.
//!
//! An Iso (isomorphism) is the strongest optic: every Iso is also a
//! [`Lens`] (and so an [`Optic`]). Used as a lens, `set` ignores the old source
//! and rebuilds it from the new focus.
//!
//! # Laws
//!
//! 1. **`ToFrom` Law**: `iso.from(iso.to(source)) == source`
//! 2. **`FromTo` Law**: `iso.to(iso.from(value)) == value`
//!
//! The laws hold on the intended domain only; an Iso fed values outside it
//! will not round-trip.
//!
//! # Examples
//!
//! ```
//! use focal::optics::{Iso, FunctionIso};
//!
//! let string_chars_iso = FunctionIso::new(
//!     |s: String| s.chars().collect::<Vec<_>>(),
//!     |chars: Vec<char>| chars.into_iter().collect::<String>(),
//! );
//!
//! let chars = string_chars_iso.to("hello".to_string());
//! assert_eq!(chars, vec!['h', 'e', 'l', 'l', 'o']);
//! assert_eq!(string_chars_iso.from(chars), "hello");
//! ```

use std::marker::PhantomData;

use super::lens::Lens;
use super::optic::Optic;

/// An isomorphism between `S` and `A`.
pub trait Iso<S, A>: Lens<S, A> {
    /// Converts from the source representation to the target.
    fn to(&self, source: S) -> A;

    /// Converts from the target representation back to the source.
    fn from(&self, value: A) -> S;

    /// Returns the same isomorphism running in the opposite direction.
    ///
    /// # Example
    ///
    /// ```
    /// use focal::optics::{Iso, FunctionIso};
    ///
    /// let to_text = FunctionIso::new(|n: u8| n.to_string(), |s: String| s.parse().unwrap_or_default());
    /// let to_number = to_text.reverse();
    /// assert_eq!(to_number.to("7".to_string()), 7);
    /// ```
    fn reverse(self) -> ReversedIso<Self, S, A>
    where
        Self: Sized,
    {
        ReversedIso::new(self)
    }
}

/// An Iso implemented using a pair of conversion functions.
///
/// Using a `FunctionIso` as a lens or prism requires `S: Clone`, since reading
/// converts a copy of the borrowed source.
pub struct FunctionIso<S, A, Fwd, Bwd>
where
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    to_function: Fwd,
    from_function: Bwd,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A, Fwd, Bwd> FunctionIso<S, A, Fwd, Bwd>
where
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    /// Creates a new `FunctionIso` from forward and backward conversions.
    #[must_use]
    pub const fn new(to_function: Fwd, from_function: Bwd) -> Self {
        Self {
            to_function,
            from_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, Fwd, Bwd> Optic<S, A> for FunctionIso<S, A, Fwd, Bwd>
where
    S: Clone,
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    fn preview(&self, source: &S) -> Option<A> {
        Some((self.to_function)(source.clone()))
    }

    fn set(&self, _source: S, value: A) -> S {
        (self.from_function)(value)
    }
}

impl<S, A, Fwd, Bwd> Lens<S, A> for FunctionIso<S, A, Fwd, Bwd>
where
    S: Clone,
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.to_function)(source.clone())
    }
}

impl<S, A, Fwd, Bwd> Iso<S, A> for FunctionIso<S, A, Fwd, Bwd>
where
    S: Clone,
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    fn to(&self, source: S) -> A {
        (self.to_function)(source)
    }

    fn from(&self, value: A) -> S {
        (self.from_function)(value)
    }
}

impl<S, A, Fwd, Bwd> Clone for FunctionIso<S, A, Fwd, Bwd>
where
    Fwd: Fn(S) -> A + Clone,
    Bwd: Fn(A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.to_function.clone(), self.from_function.clone())
    }
}

impl<S, A, Fwd, Bwd> std::fmt::Debug for FunctionIso<S, A, Fwd, Bwd>
where
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("FunctionIso").finish_non_exhaustive()
    }
}

/// Builds an isomorphism from a forward and a backward conversion.
pub const fn make_iso<S, A, Fwd, Bwd>(to: Fwd, from: Bwd) -> FunctionIso<S, A, Fwd, Bwd>
where
    Fwd: Fn(S) -> A,
    Bwd: Fn(A) -> S,
{
    FunctionIso::new(to, from)
}

/// An Iso with its direction swapped.
pub struct ReversedIso<I, S, A> {
    iso: I,
    _marker: PhantomData<fn(S) -> A>,
}

impl<I, S, A> ReversedIso<I, S, A> {
    /// Wraps `iso` so that it converts from `A` to `S`.
    #[must_use]
    pub const fn new(iso: I) -> Self {
        Self {
            iso,
            _marker: PhantomData,
        }
    }
}

impl<I, S, A> Optic<A, S> for ReversedIso<I, S, A>
where
    I: Iso<S, A>,
    A: Clone,
{
    fn preview(&self, source: &A) -> Option<S> {
        Some(self.iso.from(source.clone()))
    }

    fn set(&self, _source: A, value: S) -> A {
        self.iso.to(value)
    }
}

impl<I, S, A> Lens<A, S> for ReversedIso<I, S, A>
where
    I: Iso<S, A>,
    A: Clone,
{
    fn get(&self, source: &A) -> S {
        self.iso.from(source.clone())
    }
}

impl<I, S, A> Iso<A, S> for ReversedIso<I, S, A>
where
    I: Iso<S, A>,
    A: Clone,
{
    fn to(&self, source: A) -> S {
        self.iso.from(source)
    }

    fn from(&self, value: S) -> A {
        self.iso.to(value)
    }
}

impl<I: Clone, S, A> Clone for ReversedIso<I, S, A> {
    fn clone(&self) -> Self {
        Self::new(self.iso.clone())
    }
}

impl<I: std::fmt::Debug, S, A> std::fmt::Debug for ReversedIso<I, S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ReversedIso")
            .field("iso", &self.iso)
            .finish()
    }
}

/// Creates a `FunctionIso` from two conversion closures.
///
/// ```
/// use focal::iso;
/// use focal::optics::Iso;
///
/// let swap = iso!(|(a, b): (i32, char)| (b, a), |(b, a): (char, i32)| (a, b));
/// assert_eq!(swap.to((1, 'x')), ('x', 1));
/// ```
#[macro_export]
macro_rules! iso {
    ($to:expr, $from:expr $(,)?) => {
        $crate::optics::FunctionIso::new($to, $from)
    };
}
