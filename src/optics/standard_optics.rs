//! Standard optics that are commonly used.

use std::fmt;

use super::{FunctionIso, Iso};

/// Creates an identity Iso that doesn't transform the value.
///
/// # Example
///
/// ```
/// use focal::optics::{Iso, identity};
///
/// let identity_iso = identity::<i32>();
/// assert_eq!(identity_iso.to(42), 42);
/// assert_eq!(identity_iso.from(42), 42);
/// ```
#[must_use]
pub fn identity<T: Clone>() -> impl Iso<T, T> + Clone {
    FunctionIso::new(|x: T| x, |x: T| x)
}

/// A resource name split into its stem and extension.
///
/// Only the final path component is split, so `saves.d/slot` has no
/// extension and `saves/game.json` has stem `saves/game`.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct FileName {
    /// Everything before the last `.` of the final component.
    pub stem: String,
    /// Everything after that `.`, if there is one.
    pub extension: Option<String>,
}

impl FileName {
    /// Splits `name` at the last `.` of its final path component.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let component_start = name.rfind('/').map_or(0, |slash| slash + 1);
        match name[component_start..].rfind('.') {
            Some(dot) => {
                let dot = component_start + dot;
                Self {
                    stem: name[..dot].to_string(),
                    extension: Some(name[dot + 1..].to_string()),
                }
            }
            None => Self {
                stem: name.to_string(),
                extension: None,
            },
        }
    }

    /// Appends `suffix` to the stem, keeping the extension.
    #[must_use]
    pub fn with_stem_suffix(self, suffix: &str) -> Self {
        Self {
            stem: self.stem + suffix,
            ..self
        }
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension {
            Some(extension) => write!(formatter, "{}.{extension}", self.stem),
            None => formatter.write_str(&self.stem),
        }
    }
}

/// Isomorphism between a resource name as text and its [`FileName`] parts.
///
/// # Example
///
/// ```
/// use focal::optics::{Iso, Optic, file_name};
///
/// let renamed = file_name().modify("savedgame.json".to_string(), |name| name.with_stem_suffix("_1"));
/// assert_eq!(renamed, "savedgame_1.json");
/// ```
#[must_use]
pub fn file_name() -> impl Iso<String, FileName> + Clone {
    FunctionIso::new(
        |name: String| FileName::parse(&name),
        |parts: FileName| parts.to_string(),
    )
}
