//! Deferred paths into JSON values.
//!
//! A [`Path`] is a list of steps (member names, array positions, and spliced
//! optics) that is only evaluated when it is given a root. Field and index
//! steps are lenses, so a path built from them alone is a [`Lens`]; splicing a
//! prism with [`Path::via`] turns it into a `Path<Partial>`, which only
//! supports `preview`/`set`.
//!
//! ```
//! use focal::optics::{Optic, Path, parsed_json};
//! use serde_json::json;
//!
//! let x = Path::root().field("config").via(parsed_json()).field("x");
//! let updated = x.set(json!({"config": "{\"x\":1,\"y\":0}"}), json!(5));
//! assert_eq!(updated, json!({"config": "{\"x\":5,\"y\":0}"}));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use super::json::{IndexLens, PropLens};
use super::lens::Lens;
use super::optic::Optic;

/// Marker: every step of the path is a lens.
#[derive(Debug)]
pub enum Total {}

/// Marker: at least one step of the path may miss.
#[derive(Debug)]
pub enum Partial {}

type SharedLens = Arc<dyn Lens<Value, Value> + Send + Sync>;
type SharedOptic = Arc<dyn Optic<Value, Value> + Send + Sync>;

#[derive(Clone)]
enum Step {
    Field(PropLens),
    Index(IndexLens),
    Lens(SharedLens),
    Optic(SharedOptic),
}

impl Step {
    fn preview<'a>(&self, source: Cow<'a, Value>) -> Option<Cow<'a, Value>> {
        static NULL: Value = Value::Null;
        match (self, source) {
            (Self::Field(lens), Cow::Borrowed(value)) => {
                Some(Cow::Borrowed(lens.borrow_from(value).unwrap_or(&NULL)))
            }
            (Self::Index(lens), Cow::Borrowed(value)) => {
                Some(Cow::Borrowed(lens.borrow_from(value).unwrap_or(&NULL)))
            }
            (Self::Field(lens), Cow::Owned(mut value)) => {
                Some(Cow::Owned(lens.take_from(&mut value)))
            }
            (Self::Index(lens), Cow::Owned(mut value)) => {
                Some(Cow::Owned(lens.take_from(&mut value)))
            }
            (Self::Lens(lens), value) => Some(Cow::Owned(lens.get(&value))),
            (Self::Optic(optic), value) => optic.preview(&value).map(Cow::Owned),
        }
    }

    fn take(&self, source: &mut Value) -> Option<Value> {
        match self {
            Self::Field(lens) => Some(lens.take_from(source)),
            Self::Index(lens) => Some(lens.take_from(source)),
            Self::Lens(lens) => Some(lens.get(source)),
            Self::Optic(optic) => optic.preview(source),
        }
    }

    fn put(&self, source: Value, value: Value) -> Value {
        match self {
            Self::Field(lens) => lens.set(source, value),
            Self::Index(lens) => lens.set(source, value),
            Self::Lens(lens) => lens.set(source, value),
            Self::Optic(optic) => optic.set(source, value),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(lens) => formatter.debug_tuple("Field").field(&lens.name()).finish(),
            Self::Index(lens) => formatter.debug_tuple("Index").field(&lens.0).finish(),
            Self::Lens(_) => formatter.write_str("Lens(..)"),
            Self::Optic(_) => formatter.write_str("Optic(..)"),
        }
    }
}

/// A lazily evaluated path into a JSON value.
///
/// `K` records whether the path is [`Total`] (a lens) or [`Partial`] (a
/// prism).
pub struct Path<K = Total> {
    steps: SmallVec<[Step; 4]>,
    _kind: PhantomData<fn() -> K>,
}

/// Error returned when path text is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A `.` with no member name after it (or at the start).
    #[error("empty member name at offset {offset}")]
    EmptyField {
        /// Byte offset of the empty segment.
        offset: usize,
    },
    /// A `[` with no matching `]`.
    #[error("unterminated index starting at offset {offset}")]
    UnterminatedIndex {
        /// Byte offset of the opening bracket.
        offset: usize,
    },
    /// A quoted member name is not a valid JSON string.
    #[error("invalid quoted member name at offset {offset}")]
    InvalidQuotedName {
        /// Byte offset of the opening bracket.
        offset: usize,
    },
    /// The text between brackets is not an array position.
    #[error("invalid index `{text}`")]
    InvalidIndex {
        /// The offending text.
        text: String,
    },
}

impl Path<Total> {
    /// The empty path; focuses on the root itself.
    #[must_use]
    pub fn root() -> Self {
        Self::from_steps(SmallVec::new())
    }

    /// Parses dotted path text such as `a.b[0].c`.
    ///
    /// Member names are separated by `.`, array positions are written in
    /// brackets. A member name may also be written as a bracketed JSON string
    /// (`a["b.c"]`), which is how names that are empty or contain `.`, `[` or
    /// `]` are displayed. The empty string is the root path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when a member name is empty, a bracket is not
    /// closed, or an index is not a non-negative integer.
    ///
    /// ```
    /// use focal::optics::{Lens, Path};
    /// use serde_json::json;
    ///
    /// let path = Path::parse("a.b[1].c").unwrap();
    /// assert_eq!(path.get(&json!({"a": {"b": [0, {"c": "hit"}]}})), json!("hit"));
    /// assert_eq!(path.to_string(), "a.b[1].c");
    /// ```
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let mut path = Self::root();
        let bytes = text.as_bytes();
        let mut offset = 0;
        let mut expect_field = true;

        while offset < bytes.len() {
            match bytes[offset] {
                b'[' if bytes.get(offset + 1) == Some(&b'"') => {
                    let (name, close) = parse_quoted_name(text, offset)?;
                    path = path.field(name);
                    offset = close + 1;
                    expect_field = false;
                }
                b'[' => {
                    let close = text[offset..]
                        .find(']')
                        .map(|relative| offset + relative)
                        .ok_or(PathError::UnterminatedIndex { offset })?;
                    let digits = &text[offset + 1..close];
                    let position = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|_| digits.bytes().all(|byte| byte.is_ascii_digit()))
                        .ok_or_else(|| PathError::InvalidIndex {
                            text: digits.to_string(),
                        })?;
                    path = path.index(position);
                    offset = close + 1;
                    expect_field = false;
                }
                b'.' if !expect_field => {
                    offset += 1;
                    expect_field = true;
                    if offset == bytes.len() {
                        return Err(PathError::EmptyField { offset });
                    }
                }
                _ => {
                    let end = text[offset..]
                        .find(['.', '['])
                        .map_or(text.len(), |relative| offset + relative);
                    if end == offset {
                        return Err(PathError::EmptyField { offset });
                    }
                    path = path.field(text[offset..end].to_string());
                    offset = end;
                    expect_field = false;
                }
            }
        }
        Ok(path)
    }

    /// Reads the focus. Missing members read as `null`.
    #[must_use]
    pub fn view(&self, root: &Value) -> Value {
        self.get(root)
    }
}

/// Reads `["..."]` starting at the bracket at `offset`; returns the name and
/// the offset of the closing bracket.
fn parse_quoted_name(text: &str, offset: usize) -> Result<(String, usize), PathError> {
    let literal = &text[offset + 1..];
    let mut stream = serde_json::Deserializer::from_str(literal).into_iter::<String>();
    let name = match stream.next() {
        Some(Ok(name)) => name,
        _ => return Err(PathError::InvalidQuotedName { offset }),
    };
    let close = offset + 1 + stream.byte_offset();
    if text.as_bytes().get(close) == Some(&b']') {
        Ok((name, close))
    } else {
        Err(PathError::UnterminatedIndex { offset })
    }
}

fn needs_quoting(name: &str) -> bool {
    name.is_empty() || name.contains(['.', '[', ']'])
}

impl<K> Path<K> {
    fn from_steps(steps: SmallVec<[Step; 4]>) -> Self {
        Self {
            steps,
            _kind: PhantomData,
        }
    }

    fn push<K2>(mut self, step: Step) -> Path<K2> {
        self.steps.push(step);
        Path::from_steps(self.steps)
    }

    /// Appends a member access.
    #[must_use]
    pub fn field(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.push(Step::Field(PropLens::new(name)))
    }

    /// Appends an array position access.
    #[must_use]
    pub fn index(self, position: usize) -> Self {
        self.push(Step::Index(IndexLens(position)))
    }

    /// Splices in a lens (or iso); the path stays as total as it was.
    #[must_use]
    pub fn via_lens<L>(self, lens: L) -> Self
    where
        L: Lens<Value, Value> + Send + Sync + 'static,
    {
        self.push(Step::Lens(Arc::new(lens)))
    }

    /// Splices in an optic that may miss, such as [`parsed_json`](super::parsed_json).
    #[must_use]
    pub fn via<O>(self, optic: O) -> Path<Partial>
    where
        O: Optic<Value, Value> + Send + Sync + 'static,
    {
        self.push(Step::Optic(Arc::new(optic)))
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Reads the focus, or `default` when a step misses or the focus is
    /// `null`.
    pub fn view_or(&self, default: Value, root: &Value) -> Value {
        match self.preview_ref(root) {
            Some(value) if !value.is_null() => value.into_owned(),
            _ => default,
        }
    }

    fn preview_ref<'a>(&self, root: &'a Value) -> Option<Cow<'a, Value>> {
        self.steps
            .iter()
            .try_fold(Cow::Borrowed(root), |current, step| step.preview(current))
    }

    fn set_steps(steps: &[Step], mut source: Value, value: Value) -> Value {
        match steps {
            [] => value,
            [last] => last.put(source, value),
            [step, rest @ ..] => match step.take(&mut source) {
                Some(child) => {
                    let updated = Self::set_steps(rest, child, value);
                    step.put(source, updated)
                }
                None => {
                    debug!(step = ?step, "path step missed; source left unchanged");
                    source
                }
            },
        }
    }
}

impl<K> Optic<Value, Value> for Path<K> {
    fn preview(&self, source: &Value) -> Option<Value> {
        self.preview_ref(source).map(Cow::into_owned)
    }

    fn set(&self, source: Value, value: Value) -> Value {
        Self::set_steps(&self.steps, source, value)
    }
}

impl Lens<Value, Value> for Path<Total> {
    fn get(&self, source: &Value) -> Value {
        self.preview_ref(source)
            .map(Cow::into_owned)
            .unwrap_or_default()
    }
}

impl Default for Path<Total> {
    fn default() -> Self {
        Self::root()
    }
}

impl FromStr for Path<Total> {
    type Err = PathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl<K> Clone for Path<K> {
    fn clone(&self) -> Self {
        Self::from_steps(self.steps.clone())
    }
}

impl<K> fmt::Debug for Path<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(&self.steps).finish()
    }
}

impl<K> fmt::Display for Path<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                Step::Field(lens) if needs_quoting(lens.name()) => {
                    let quoted =
                        serde_json::to_string(lens.name()).map_err(|_| fmt::Error)?;
                    write!(formatter, "[{quoted}]")?;
                }
                Step::Field(lens) if position == 0 => formatter.write_str(lens.name())?,
                Step::Field(lens) => write!(formatter, ".{}", lens.name())?,
                Step::Index(lens) => write!(formatter, "[{}]", lens.0)?,
                Step::Lens(_) | Step::Optic(_) => formatter.write_str("<optic>")?,
            }
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(Path<Total>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Path<Partial>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{parsed_json, prop};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_root_path_is_identity() {
        let root = Path::root();
        let value = json!({"a": 1});
        assert!(root.is_empty());
        assert_eq!(root.view(&value), value);
        assert_eq!(root.set(value, json!(2)), json!(2));
    }

    #[test]
    fn test_field_and_index_steps() {
        let path = Path::root().field("items").index(1).field("name");
        let data = json!({"items": [{"name": "a"}, {"name": "b"}], "count": 2});

        assert_eq!(path.len(), 3);
        assert_eq!(path.view(&data), json!("b"));

        let updated = path.set(data, json!("z"));
        assert_eq!(
            updated,
            json!({"items": [{"name": "a"}, {"name": "z"}], "count": 2})
        );
    }

    #[test]
    fn test_set_creates_missing_structure() {
        let path = Path::root().field("a").index(1).field("b");
        assert_eq!(
            path.set(json!({}), json!(true)),
            json!({"a": [null, {"b": true}]})
        );
    }

    #[test]
    fn test_partial_path_misses_leave_source_unchanged() {
        let path = Path::root().field("config").via(parsed_json()).field("x");
        let source = json!({"config": "not json"});

        assert_eq!(path.preview(&source), None);
        assert_eq!(path.set(source.clone(), json!(1)), source);
    }

    #[test]
    fn test_via_lens_keeps_path_total() {
        let path = Path::root().field("payload").via_lens(prop("id"));
        let data = json!({"payload": {"id": 7}, "kind": "event"});

        assert_eq!(path.view(&data), json!(7));
        assert_eq!(
            path.set(data, json!(8)),
            json!({"payload": {"id": 8}, "kind": "event"})
        );
    }

    #[rstest]
    #[case("", "")]
    #[case("a", "a")]
    #[case("a.b.c", "a.b.c")]
    #[case("a[0]", "a[0]")]
    #[case("[2].x", "[2].x")]
    #[case("a[0][1].b", "a[0][1].b")]
    fn test_parse_display_roundtrip(#[case] text: &str, #[case] rendered: &str) {
        let path: Path = text.parse().unwrap();
        assert_eq!(path.to_string(), rendered);
    }

    #[rstest]
    #[case("a[\"b.c\"]", "a[\"b.c\"]", 2)]
    #[case("[\"\"]", "[\"\"]", 1)]
    #[case("[\"plain\"].x", "plain.x", 2)]
    #[case("a[\"[0]\"][1]", "a[\"[0]\"][1]", 3)]
    fn test_parse_quoted_names(#[case] text: &str, #[case] rendered: &str, #[case] steps: usize) {
        let path = Path::parse(text).unwrap();
        assert_eq!(path.len(), steps);
        assert_eq!(path.to_string(), rendered);
    }

    #[test]
    fn test_dotted_member_name_roundtrips() {
        let path = Path::root().field("a.b").index(0);
        let reparsed = Path::parse(&path.to_string()).unwrap();
        let data = json!({"a.b": ["hit"], "a": {"b": ["miss"]}});

        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed.view(&data), json!("hit"));
    }

    #[test]
    fn test_trailing_prism_builds_when_source_does_not_match() {
        let path = Path::root().via(parsed_json());
        assert_eq!(path.set(json!(1), json!([2])), json!("[2]"));
    }

    #[rstest]
    #[case("a[\"b", PathError::InvalidQuotedName { offset: 1 })]
    #[case("a[\"b\"", PathError::UnterminatedIndex { offset: 1 })]
    #[case("a.", PathError::EmptyField { offset: 2 })]
    #[case(".a", PathError::EmptyField { offset: 0 })]
    #[case("a..b", PathError::EmptyField { offset: 2 })]
    #[case("a[1", PathError::UnterminatedIndex { offset: 1 })]
    #[case("a[x]", PathError::InvalidIndex { text: "x".to_string() })]
    #[case("a[-1]", PathError::InvalidIndex { text: "-1".to_string() })]
    #[case("a[]", PathError::InvalidIndex { text: String::new() })]
    fn test_parse_errors(#[case] text: &str, #[case] expected: PathError) {
        assert_eq!(Path::parse(text).unwrap_err(), expected);
    }

    #[test]
    fn test_view_or_uses_default_for_missing_and_null() {
        let path = Path::root().field("type");
        assert_eq!(path.view_or(json!("unknown"), &json!({})), json!("unknown"));
        assert_eq!(
            path.view_or(json!("unknown"), &json!({"type": null})),
            json!("unknown")
        );
        assert_eq!(
            path.view_or(json!("unknown"), &json!({"type": "human"})),
            json!("human")
        );
    }
}
