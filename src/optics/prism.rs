//! Prism optics for foci that may be absent.
//!
//! A prism reads its focus only when the source matches (an enum variant, a
//! string that parses, a number in range) and reports absence otherwise. Its
//! `set` is total: it builds a source holding the new focus whether or not the
//! previous source matched.
//!
//! Prisms are plain [`Optic`]s; there is no separate trait.
//!
//! # Laws
//!
//! 1. **SetPreview Law**: `prism.preview(&prism.set(source, value.clone())) == Some(value)`
//! 2. **PreviewSet Law**: if `prism.preview(&source) == Some(value)` then
//!    `prism.set(source.clone(), value) == source`
//!
//! # Examples
//!
//! ```
//! use focal::optics::Optic;
//! use focal::prism;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! let circle_prism = prism!(Shape, Circle);
//!
//! assert_eq!(circle_prism.preview(&Shape::Circle(5.0)), Some(5.0));
//! assert_eq!(circle_prism.preview(&Shape::Rectangle(3.0, 4.0)), None);
//!
//! // set rebuilds the variant even when the source did not match
//! let rebuilt = circle_prism.set(Shape::Rectangle(3.0, 4.0), 1.0);
//! assert_eq!(rebuilt, Shape::Circle(1.0));
//! ```

use std::marker::PhantomData;

use super::optic::Optic;

/// A prism implemented using a matcher and a builder.
///
/// - the matcher returns `Some(focus)` when the source matches, `None`
///   otherwise
/// - the builder receives the previous source and the new focus and returns
///   the new source
///
/// # Example
///
/// ```
/// use focal::optics::{FunctionPrism, Optic};
///
/// let even = FunctionPrism::new(
///     |number: &u32| (number % 2 == 0).then_some(number / 2),
///     |_: u32, half: u32| half * 2,
/// );
///
/// assert_eq!(even.preview(&8), Some(4));
/// assert_eq!(even.preview(&7), None);
/// assert_eq!(even.set(7, 5), 10);
/// ```
pub struct FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A>,
    B: Fn(S, A) -> S,
{
    matcher: M,
    builder: B,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A, M, B> FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A>,
    B: Fn(S, A) -> S,
{
    /// Creates a new `FunctionPrism` from a matcher and a builder.
    #[must_use]
    pub const fn new(matcher: M, builder: B) -> Self {
        Self {
            matcher,
            builder,
            _marker: PhantomData,
        }
    }
}

impl<S, A, M, B> Optic<S, A> for FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A>,
    B: Fn(S, A) -> S,
{
    fn preview(&self, source: &S) -> Option<A> {
        (self.matcher)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.builder)(source, value)
    }
}

impl<S, A, M, B> Clone for FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A> + Clone,
    B: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.matcher.clone(), self.builder.clone())
    }
}

impl<S, A, M, B> std::fmt::Debug for FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A>,
    B: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionPrism")
            .finish_non_exhaustive()
    }
}

/// Builds a prism from a matcher and a builder.
pub const fn make_prism<S, A, M, B>(matcher: M, builder: B) -> FunctionPrism<S, A, M, B>
where
    M: Fn(&S) -> Option<A>,
    B: Fn(S, A) -> S,
{
    FunctionPrism::new(matcher, builder)
}

/// Creates a prism for a single-field tuple variant of an enum.
///
/// The field type must implement `Clone`. For unit, multi-field and struct
/// variants use `#[derive(Prisms)]`.
///
/// # Syntax
///
/// ```text
/// prism!(EnumType, VariantName)
/// ```
#[macro_export]
macro_rules! prism {
    ($enum_type:ident, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |source: &$enum_type| match source {
                $enum_type::$variant(value) => ::core::option::Option::Some(::core::clone::Clone::clone(value)),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            },
            |_source: $enum_type, value| $enum_type::$variant(value),
        )
    };
    ($enum_type:ident < $($generic:tt),+ >, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |source: &$enum_type<$($generic),+>| match source {
                $enum_type::$variant(value) => ::core::option::Option::Some(::core::clone::Clone::clone(value)),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            },
            |_source: $enum_type<$($generic),+>, value| $enum_type::$variant(value),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, PartialEq, Debug)]
    enum Reading {
        Celsius(f64),
        Missing,
    }

    #[rstest]
    #[case(Reading::Celsius(21.5), Some(21.5))]
    #[case(Reading::Missing, None)]
    fn test_prism_macro_preview(#[case] reading: Reading, #[case] expected: Option<f64>) {
        let celsius = prism!(Reading, Celsius);
        assert_eq!(celsius.preview(&reading), expected);
    }

    #[test]
    fn test_set_builds_variant_from_non_matching_source() {
        let celsius = prism!(Reading, Celsius);
        assert_eq!(celsius.set(Reading::Missing, 3.0), Reading::Celsius(3.0));
    }

    #[test]
    fn test_make_prism_parses_numbers() {
        let number = make_prism(
            |text: &String| text.parse::<i64>().ok(),
            |_: String, value: i64| value.to_string(),
        );

        assert_eq!(number.preview(&"42".to_string()), Some(42));
        assert_eq!(number.preview(&"forty-two".to_string()), None);
        assert_eq!(number.modify("41".to_string(), |value| value + 1), "42");
    }
}
