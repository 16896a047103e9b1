//! The base optic trait shared by lenses, prisms and isomorphisms.
//!
//! An [`Optic`] pairs a partial read (`preview`) with a total write (`set`)
//! between a source `S` and a focus `A`. Lenses refine it with a total `get`,
//! isomorphisms further refine lenses with a lossless `to`/`from` pair:
//!
//! ```text
//! Iso <: Lens <: Optic
//! ```
//!
//! Anything that is only an `Optic` behaves as a prism: its focus may be
//! absent, but `set` always produces a valid source.
//!
//! Foci are handed out by value. This is what lets an isomorphism (which
//! builds a new value, e.g. a parsed JSON document) sit in the middle of a
//! chain of structural lenses.

use std::marker::PhantomData;
use std::sync::Arc;

use super::iso::Iso;
use super::lens::Lens;

/// A composable accessor/updater pair focusing on an `A` inside an `S`.
///
/// # Laws
///
/// When the focus is present:
///
/// 1. **PreviewSet**: `optic.set(source.clone(), optic.preview(&source).unwrap()) == source`
/// 2. **SetPreview**: `optic.preview(&optic.set(source, value.clone())) == Some(value)`
pub trait Optic<S, A> {
    /// Reads the focus, or `None` when the optic does not apply to `source`.
    fn preview(&self, source: &S) -> Option<A>;

    /// Replaces the focus, returning the updated source.
    ///
    /// Never fails: an optic whose focus was absent still returns a valid `S`.
    fn set(&self, source: S, value: A) -> S;

    /// Applies `function` to the focus if present; otherwise returns `source`
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use focal::optics::{Optic, prop};
    /// use serde_json::json;
    ///
    /// let level = prop("level");
    /// let bumped = level.modify(json!({"level": 1}), |value| json!(value.as_i64().unwrap_or(0) + 1));
    /// assert_eq!(bumped, json!({"level": 2}));
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        Self: Sized,
        F: FnOnce(A) -> A,
    {
        match self.preview(&source) {
            Some(value) => self.set(source, function(value)),
            None => source,
        }
    }

    /// Returns `true` if the focus is present in `source`.
    fn is_present(&self, source: &S) -> bool {
        self.preview(source).is_some()
    }

    /// Sequences this optic with `other`, focusing on a `B` inside the `A`.
    ///
    /// The result is a lens when both sides are lenses and an isomorphism when
    /// both sides are isomorphisms; otherwise it behaves as a prism.
    fn compose<B, O>(self, other: O) -> ComposedOptic<Self, O, A>
    where
        Self: Sized,
        O: Optic<A, B>,
    {
        ComposedOptic::new(self, other)
    }
}

/// Two optics joined end to end.
///
/// `set(s, b)` is `outer.set(s, inner.set(outer.get(s), b))`. If the outer
/// focus is absent the source is returned unchanged, since there is nothing
/// for the inner optic to update.
pub struct ComposedOptic<O1, O2, A> {
    first: O1,
    second: O2,
    _marker: PhantomData<fn() -> A>,
}

impl<O1, O2, A> ComposedOptic<O1, O2, A> {
    /// Joins `first` (outer) and `second` (inner).
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }

    /// The outer optic.
    pub const fn first(&self) -> &O1 {
        &self.first
    }

    /// The inner optic.
    pub const fn second(&self) -> &O2 {
        &self.second
    }
}

impl<S, A, B, O1, O2> Optic<S, B> for ComposedOptic<O1, O2, A>
where
    O1: Optic<S, A>,
    O2: Optic<A, B>,
{
    fn preview(&self, source: &S) -> Option<B> {
        self.first
            .preview(source)
            .and_then(|intermediate| self.second.preview(&intermediate))
    }

    fn set(&self, source: S, value: B) -> S {
        match self.first.preview(&source) {
            Some(intermediate) => {
                let updated = self.second.set(intermediate, value);
                self.first.set(source, updated)
            }
            None => source,
        }
    }
}

impl<S, A, B, O1, O2> Lens<S, B> for ComposedOptic<O1, O2, A>
where
    O1: Lens<S, A>,
    O2: Lens<A, B>,
{
    fn get(&self, source: &S) -> B {
        self.second.get(&self.first.get(source))
    }
}

impl<S, A, B, O1, O2> Iso<S, B> for ComposedOptic<O1, O2, A>
where
    O1: Iso<S, A>,
    O2: Iso<A, B>,
{
    fn to(&self, source: S) -> B {
        self.second.to(self.first.to(source))
    }

    fn from(&self, value: B) -> S {
        self.first.from(self.second.from(value))
    }
}

impl<O1: Clone, O2: Clone, A> Clone for ComposedOptic<O1, O2, A> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: std::fmt::Debug, O2: std::fmt::Debug, A> std::fmt::Debug for ComposedOptic<O1, O2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedOptic")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

// Optics are shared freely: a borrowed or reference-counted optic is the same
// optic.

impl<S, A, O: Optic<S, A> + ?Sized> Optic<S, A> for &O {
    fn preview(&self, source: &S) -> Option<A> {
        (**self).preview(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (**self).set(source, value)
    }
}

impl<S, A, O: Lens<S, A> + ?Sized> Lens<S, A> for &O {
    fn get(&self, source: &S) -> A {
        (**self).get(source)
    }
}

impl<S, A, O: Iso<S, A> + ?Sized> Iso<S, A> for &O {
    fn to(&self, source: S) -> A {
        (**self).to(source)
    }

    fn from(&self, value: A) -> S {
        (**self).from(value)
    }
}

impl<S, A, O: Optic<S, A> + ?Sized> Optic<S, A> for Arc<O> {
    fn preview(&self, source: &S) -> Option<A> {
        (**self).preview(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (**self).set(source, value)
    }
}

impl<S, A, O: Lens<S, A> + ?Sized> Lens<S, A> for Arc<O> {
    fn get(&self, source: &S) -> A {
        (**self).get(source)
    }
}

impl<S, A, O: Iso<S, A> + ?Sized> Iso<S, A> for Arc<O> {
    fn to(&self, source: S) -> A {
        (**self).to(source)
    }

    fn from(&self, value: A) -> S {
        (**self).from(value)
    }
}

/// Sequences two optics: `compose(outer, inner)` focuses on the inner
/// optic's target within the outer optic's target.
///
/// Composition is associative; `compose(compose(a, b), c)` and
/// `compose(a, compose(b, c))` read and write identically.
///
/// # Example
///
/// ```
/// use focal::optics::{compose, prop, view};
/// use serde_json::json;
///
/// let deep = compose(prop("field1"), prop("field2"));
/// assert_eq!(view(&deep, &json!({"field1": {"field2": 42}})), json!(42));
/// ```
pub fn compose<S, A, B, O1, O2>(first: O1, second: O2) -> ComposedOptic<O1, O2, A>
where
    O1: Optic<S, A>,
    O2: Optic<A, B>,
{
    ComposedOptic::new(first, second)
}

/// Reads the focus of a lens (or iso). Always succeeds.
pub fn view<S, A, L>(optic: &L, root: &S) -> A
where
    L: Lens<S, A> + ?Sized,
{
    optic.get(root)
}

/// Reads the focus of any optic, `None` when it does not apply.
pub fn preview<S, A, O>(optic: &O, root: &S) -> Option<A>
where
    O: Optic<S, A> + ?Sized,
{
    optic.preview(root)
}

/// Writes `value` through `optic`, returning the new root.
pub fn set<S, A, O>(optic: &O, value: A, root: S) -> S
where
    O: Optic<S, A> + ?Sized,
{
    optic.set(root, value)
}

/// Applies `function` to the focus of `optic`, returning the new root.
pub fn over<S, A, O, F>(optic: &O, root: S, function: F) -> S
where
    O: Optic<S, A>,
    F: FnOnce(A) -> A,
{
    optic.modify(root, function)
}
