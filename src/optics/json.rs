//! Optics over `serde_json::Value`.
//!
//! [`prop`] and [`index`] are structural lenses: a missing key or element
//! reads as [`Value::Null`], and writing one creates it. The remaining optics
//! move between JSON text and parsed values:
//!
//! | optic            | source      | focus   | kind  |
//! |------------------|-------------|---------|-------|
//! | [`json_text`]    | `String`    | `Value` | prism |
//! | [`parsed_json`]  | `Value`     | `Value` | prism |
//! | [`json_bytes`]   | `Vec<u8>`   | `Value` | prism |
//! | [`json_iso`]     | `String`    | `Value` | iso   |
//!
//! Serialization is compact, and object keys come out in sorted order, so
//! `json_iso` round-trips text that is already in that canonical form.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::debug;

use super::iso::Iso;
use super::lens::Lens;
use super::optic::Optic;

/// Lens onto a named member of a JSON object.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PropLens {
    name: Cow<'static, str>,
}

impl PropLens {
    /// Creates a lens focusing on the member called `name`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Creates a lens from a static name, usable in `const` items.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// The member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn borrow_from<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        source.get(self.name())
    }

    /// Moves the member out of `source`, leaving `Null` in its place.
    pub(crate) fn take_from(&self, source: &mut Value) -> Value {
        source
            .get_mut(self.name())
            .map(Value::take)
            .unwrap_or_default()
    }
}

impl Optic<Value, Value> for PropLens {
    fn preview(&self, source: &Value) -> Option<Value> {
        Some(self.get(source))
    }

    fn set(&self, source: Value, value: Value) -> Value {
        let mut object = match source {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        object.insert(self.name.to_string(), value);
        Value::Object(object)
    }
}

impl Lens<Value, Value> for PropLens {
    fn get(&self, source: &Value) -> Value {
        self.borrow_from(source).cloned().unwrap_or_default()
    }
}

/// Largest position [`IndexLens::set`] will pad an array up to.
pub const MAX_PADDED_INDEX: usize = 1 << 16;

/// Lens onto a position of a JSON array.
///
/// Writing past the end pads with `null`, up to [`MAX_PADDED_INDEX`]; a write
/// further out leaves the source unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IndexLens(pub usize);

impl IndexLens {
    pub(crate) fn borrow_from<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        source.get(self.0)
    }

    pub(crate) fn take_from(&self, source: &mut Value) -> Value {
        source
            .get_mut(self.0)
            .map(Value::take)
            .unwrap_or_default()
    }
}

impl Optic<Value, Value> for IndexLens {
    fn preview(&self, source: &Value) -> Option<Value> {
        Some(self.get(source))
    }

    fn set(&self, source: Value, value: Value) -> Value {
        let length = source.as_array().map_or(0, Vec::len);
        if self.0 >= length && self.0 > MAX_PADDED_INDEX {
            debug!(index = self.0, length, "index too far past the end; source left unchanged");
            return source;
        }
        let mut items = match source {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        if self.0 < items.len() {
            items[self.0] = value;
        } else {
            items.resize(self.0, Value::Null);
            items.push(value);
        }
        Value::Array(items)
    }
}

impl Lens<Value, Value> for IndexLens {
    fn get(&self, source: &Value) -> Value {
        self.borrow_from(source).cloned().unwrap_or_default()
    }
}

/// Focuses on the member `name` of a JSON object.
///
/// ```
/// use focal::optics::{prop, set, view};
/// use serde_json::json;
///
/// let name = prop("name");
/// assert_eq!(view(&name, &json!({"name": "Jesse"})), json!("Jesse"));
/// assert_eq!(view(&name, &json!({})), json!(null));
/// assert_eq!(set(&name, json!("Brandy"), json!({"age": 3})), json!({"age": 3, "name": "Brandy"}));
/// ```
#[must_use]
pub fn prop(name: impl Into<Cow<'static, str>>) -> PropLens {
    PropLens::new(name)
}

/// Focuses on position `position` of a JSON array.
///
/// Writing past the end pads the array with `null`, up to
/// [`MAX_PADDED_INDEX`].
///
/// ```
/// use focal::optics::{index, set};
/// use serde_json::json;
///
/// assert_eq!(set(&index(2), json!("c"), json!(["a"])), json!(["a", null, "c"]));
/// ```
#[must_use]
pub const fn index(position: usize) -> IndexLens {
    IndexLens(position)
}

/// Prism from JSON text to the value it encodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct JsonText;

impl Optic<String, Value> for JsonText {
    fn preview(&self, source: &String) -> Option<Value> {
        serde_json::from_str(source)
            .inspect_err(|error| debug!(%error, "source is not JSON text"))
            .ok()
    }

    fn set(&self, _source: String, value: Value) -> String {
        value.to_string()
    }
}

/// Prism from a JSON string value holding JSON text to the value it encodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ParsedJson;

impl Optic<Value, Value> for ParsedJson {
    fn preview(&self, source: &Value) -> Option<Value> {
        let text = source.as_str()?;
        serde_json::from_str(text)
            .inspect_err(|error| debug!(%error, "string value is not JSON text"))
            .ok()
    }

    fn set(&self, _source: Value, value: Value) -> Value {
        Value::String(value.to_string())
    }
}

/// Prism from UTF-8 JSON bytes to the value they encode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct JsonBytes;

impl Optic<Vec<u8>, Value> for JsonBytes {
    fn preview(&self, source: &Vec<u8>) -> Option<Value> {
        serde_json::from_slice(source)
            .inspect_err(|error| debug!(%error, "bytes are not JSON"))
            .ok()
    }

    fn set(&self, _source: Vec<u8>, value: Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }
}

/// Isomorphism between canonical JSON text and its parsed value.
///
/// Text that does not parse maps to `null`; keep such input out of the iso's
/// domain (or use [`json_text`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct JsonIso;

impl Optic<String, Value> for JsonIso {
    fn preview(&self, source: &String) -> Option<Value> {
        Some(self.get(source))
    }

    fn set(&self, _source: String, value: Value) -> String {
        self.from(value)
    }
}

impl Lens<String, Value> for JsonIso {
    fn get(&self, source: &String) -> Value {
        serde_json::from_str(source).unwrap_or_else(|error| {
            debug!(%error, "json iso applied outside its domain");
            Value::Null
        })
    }
}

impl Iso<String, Value> for JsonIso {
    fn to(&self, source: String) -> Value {
        self.get(&source)
    }

    fn from(&self, value: Value) -> String {
        value.to_string()
    }
}

/// "This string is valid JSON."
///
/// ```
/// use focal::optics::{json_text, preview};
/// use serde_json::json;
///
/// assert_eq!(preview(&json_text(), &"not json".to_string()), None);
/// assert_eq!(preview(&json_text(), &r#"{"a":1}"#.to_string()), Some(json!({"a": 1})));
/// ```
#[must_use]
pub const fn json_text() -> JsonText {
    JsonText
}

/// "This JSON string value holds JSON text", for documents nested as strings.
///
/// ```
/// use focal::optics::{Optic, parsed_json, prop};
/// use serde_json::json;
///
/// let config = prop("config").compose(parsed_json()).compose(prop("x"));
/// let updated = config.set(json!({"config": "{\"x\":1}"}), json!(2));
/// assert_eq!(updated, json!({"config": "{\"x\":2}"}));
/// ```
#[must_use]
pub const fn parsed_json() -> ParsedJson {
    ParsedJson
}

/// "These bytes are valid JSON."
#[must_use]
pub const fn json_bytes() -> JsonBytes {
    JsonBytes
}

/// Canonical JSON text ⇄ parsed value.
#[must_use]
pub const fn json_iso() -> JsonIso {
    JsonIso
}

static_assertions::assert_impl_all!(PropLens: Send, Sync, Clone);
static_assertions::assert_impl_all!(IndexLens: Send, Sync, Copy);
static_assertions::assert_impl_all!(JsonText: Send, Sync, Copy);
static_assertions::assert_impl_all!(ParsedJson: Send, Sync, Copy);
static_assertions::assert_impl_all!(JsonBytes: Send, Sync, Copy);
static_assertions::assert_impl_all!(JsonIso: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const NAME: PropLens = PropLens::from_static("name");

    #[rstest]
    #[case(json!({"name": "x"}), json!("x"))]
    #[case(json!({"other": 1}), Value::Null)]
    #[case(json!([1, 2]), Value::Null)]
    #[case(json!(7), Value::Null)]
    fn test_prop_get(#[case] source: Value, #[case] expected: Value) {
        assert_eq!(NAME.get(&source), expected);
    }

    #[test]
    fn test_prop_set_keeps_siblings() {
        let source = json!({"name": "a", "age": 1});
        assert_eq!(NAME.set(source, json!("b")), json!({"name": "b", "age": 1}));
    }

    #[test]
    fn test_prop_set_replaces_non_object() {
        assert_eq!(NAME.set(json!(3), json!("b")), json!({"name": "b"}));
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(1_000_000_000)]
    #[case(MAX_PADDED_INDEX + 1)]
    fn test_index_set_far_past_end_is_refused(#[case] position: usize) {
        let source = json!({"a": [1]});
        assert_eq!(IndexLens(position).set(source.clone(), json!(2)), source);
        assert_eq!(IndexLens(position).set(json!([0]), json!(2)), json!([0]));
    }

    #[test]
    fn test_index_set_pads_up_to_limit() {
        let padded = IndexLens(MAX_PADDED_INDEX).set(json!([]), json!(true));
        let items = padded.as_array().unwrap();
        assert_eq!(items.len(), MAX_PADDED_INDEX + 1);
        assert_eq!(items[MAX_PADDED_INDEX], json!(true));
        assert!(items[0].is_null());
    }

    #[test]
    fn test_take_from_leaves_null() {
        let mut source = json!({"name": "a"});
        assert_eq!(NAME.take_from(&mut source), json!("a"));
        assert_eq!(source, json!({"name": null}));
        assert_eq!(prop("missing").take_from(&mut source), Value::Null);
    }

    #[rstest]
    #[case(json!([1, 2, 3]), 1, json!([1, 9, 3]))]
    #[case(json!([1]), 1, json!([1, 9]))]
    #[case(json!([]), 2, json!([null, null, 9]))]
    #[case(json!({"a": 1}), 0, json!([9]))]
    fn test_index_set(#[case] source: Value, #[case] position: usize, #[case] expected: Value) {
        assert_eq!(index(position).set(source, json!(9)), expected);
    }

    #[test]
    fn test_index_get_out_of_range_is_null() {
        assert_eq!(index(5).get(&json!([1])), Value::Null);
        assert_eq!(index(0).get(&json!([1])), json!(1));
    }

    #[rstest]
    #[case("not json", None)]
    #[case("{\"a\":1}", Some(json!({"a": 1})))]
    #[case("[]", Some(json!([])))]
    #[case("", None)]
    fn test_json_text_preview(#[case] text: &str, #[case] expected: Option<Value>) {
        assert_eq!(json_text().preview(&text.to_string()), expected);
    }

    #[test]
    fn test_parsed_json_misses_non_strings() {
        assert_eq!(parsed_json().preview(&json!(1)), None);
        assert_eq!(parsed_json().preview(&json!("nope")), None);
        assert_eq!(parsed_json().preview(&json!("[1]")), Some(json!([1])));
    }

    #[test]
    fn test_json_bytes_roundtrip() {
        let bytes = json_bytes().set(Vec::new(), json!({"b": [1, 2]}));
        assert_eq!(bytes, br#"{"b":[1,2]}"#.to_vec());
        assert_eq!(json_bytes().preview(&bytes), Some(json!({"b": [1, 2]})));
        assert_eq!(json_bytes().preview(&vec![0xff, 0xfe]), None);
    }

    #[rstest]
    #[case("{}")]
    #[case("[]")]
    #[case("\"\"")]
    #[case(r#"{"a":[1,{"b":null}],"c":true}"#)]
    fn test_json_iso_roundtrips_canonical_text(#[case] text: &str) {
        let iso = json_iso();
        assert_eq!(iso.from(iso.to(text.to_string())), text);
    }

    #[test]
    fn test_json_iso_outside_domain_is_null() {
        assert_eq!(json_iso().to("{".to_string()), Value::Null);
    }
}
