//! Highlight specs
//!
//! A `HighlightSpec` describes what to highlight. It is supplied once and
//! re-evaluated against the current text on every pass. Specs can also be
//! decoded from TOML values, which is how config files describe them.

use std::fmt;
use std::rc::Rc;

use regex::Regex;
use toml::Value;

use crate::error::{HighlightError, Result};

/// Signature of a computed highlight: text in, any other spec out
pub type ComputeFn = dyn Fn(&str) -> Result<HighlightSpec>;

/// A compiled pattern plus its matching mode
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    global: bool,
}

impl Pattern {
    /// Wrap a compiled regex.
    ///
    /// A global pattern yields every match, a non-global one only the first.
    pub fn new(regex: Regex, global: bool) -> Self {
        Self { regex, global }
    }

    /// Compile a pattern from source
    pub fn parse(source: &str, global: bool) -> Result<Self> {
        Regex::new(source)
            .map(|regex| Self::new(regex, global))
            .map_err(|e| {
                HighlightError::UnrecognizedSpec(format!("invalid pattern {:?}: {}", source, e))
            })
    }

    /// The compiled regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether every match is highlighted
    pub fn is_global(&self) -> bool {
        self.global
    }
}

/// A function computing a spec from the current text
#[derive(Clone)]
pub struct Computed(Rc<ComputeFn>);

impl Computed {
    /// Run the function against `text`
    pub fn call(&self, text: &str) -> Result<HighlightSpec> {
        (self.0)(text)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Computed(..)")
    }
}

/// What to highlight
#[derive(Debug, Clone, Default)]
pub enum HighlightSpec {
    /// Highlight nothing
    #[default]
    Empty,
    /// Case-insensitive substring
    Literal(String),
    /// Regular expression matches
    Pattern(Pattern),
    /// An explicit byte range, trusted as-is
    Range { start: usize, end: usize },
    /// A spec computed from the text on every pass
    Computed(Computed),
    /// Several specs, resolved in order
    List(Vec<HighlightSpec>),
    /// A spec whose ranges carry a class name
    Styled {
        inner: Box<HighlightSpec>,
        class_name: String,
    },
}

impl HighlightSpec {
    /// Highlight every occurrence of `text`, ignoring case
    pub fn literal(text: impl Into<String>) -> Self {
        HighlightSpec::Literal(text.into())
    }

    /// Highlight matches of a compiled regex
    pub fn pattern(regex: Regex, global: bool) -> Self {
        HighlightSpec::Pattern(Pattern::new(regex, global))
    }

    /// Highlight the byte range `[start, end)`
    pub fn range(start: usize, end: usize) -> Self {
        HighlightSpec::Range { start, end }
    }

    /// Highlight whatever `f` computes from the text
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<HighlightSpec> + 'static,
    {
        HighlightSpec::Computed(Computed(Rc::new(f)))
    }

    /// Combine several specs
    pub fn list(items: impl IntoIterator<Item = HighlightSpec>) -> Self {
        HighlightSpec::List(items.into_iter().collect())
    }

    /// Attach a class name to every range `inner` produces
    pub fn styled(inner: HighlightSpec, class_name: impl Into<String>) -> Self {
        HighlightSpec::Styled {
            inner: Box::new(inner),
            class_name: class_name.into(),
        }
    }

    /// Decode a spec from its TOML shape.
    ///
    /// Accepted shapes:
    /// - a string: literal match
    /// - `[start, end]` with two integers: a range
    /// - any other array: a list of specs
    /// - `{ pattern = "...", global = true }`: a regex
    /// - `{ highlight = <spec>, class_name = "..." }`: a styled wrapper
    /// - `false`, `0`, `0.0` or `""`: nothing
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s.is_empty() => Ok(HighlightSpec::Empty),
            Value::String(s) => Ok(HighlightSpec::Literal(s.clone())),
            Value::Boolean(false) | Value::Integer(0) => Ok(HighlightSpec::Empty),
            Value::Float(f) if *f == 0.0 || f.is_nan() => Ok(HighlightSpec::Empty),
            Value::Array(items) => match items.as_slice() {
                [Value::Integer(start), Value::Integer(end)] => {
                    Ok(HighlightSpec::range(offset(*start), offset(*end)))
                }
                _ => items
                    .iter()
                    .map(Self::from_value)
                    .collect::<Result<Vec<_>>>()
                    .map(HighlightSpec::List),
            },
            Value::Table(table) => Self::from_table(table),
            other => Err(HighlightError::UnrecognizedSpec(format!(
                "unsupported {} value",
                other.type_str()
            ))),
        }
    }

    fn from_table(table: &toml::Table) -> Result<Self> {
        if let Some(inner) = table.get("highlight") {
            let inner = Self::from_value(inner)?;
            return match table.get("class_name") {
                None => Ok(inner),
                Some(Value::String(class_name)) => Ok(Self::styled(inner, class_name.clone())),
                Some(other) => Err(HighlightError::UnrecognizedSpec(format!(
                    "class_name must be a string, found {}",
                    other.type_str()
                ))),
            };
        }

        if let Some(source) = table.get("pattern") {
            let Value::String(source) = source else {
                return Err(HighlightError::UnrecognizedSpec(format!(
                    "pattern must be a string, found {}",
                    source.type_str()
                )));
            };
            let global = match table.get("global") {
                None => false,
                Some(Value::Boolean(global)) => *global,
                Some(other) => {
                    return Err(HighlightError::UnrecognizedSpec(format!(
                        "global must be a boolean, found {}",
                        other.type_str()
                    )))
                }
            };
            return Pattern::parse(source, global).map(HighlightSpec::Pattern);
        }

        Err(HighlightError::UnrecognizedSpec(
            "table needs a `highlight` or `pattern` key".to_string(),
        ))
    }
}

/// Negative offsets clamp to the start of the text
fn offset(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

impl From<&str> for HighlightSpec {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            HighlightSpec::Empty
        } else {
            HighlightSpec::literal(text)
        }
    }
}

impl From<String> for HighlightSpec {
    fn from(text: String) -> Self {
        if text.is_empty() {
            HighlightSpec::Empty
        } else {
            HighlightSpec::Literal(text)
        }
    }
}

impl From<(usize, usize)> for HighlightSpec {
    fn from((start, end): (usize, usize)) -> Self {
        HighlightSpec::range(start, end)
    }
}

impl From<Pattern> for HighlightSpec {
    fn from(pattern: Pattern) -> Self {
        HighlightSpec::Pattern(pattern)
    }
}

impl From<Vec<HighlightSpec>> for HighlightSpec {
    fn from(items: Vec<HighlightSpec>) -> Self {
        HighlightSpec::List(items)
    }
}

impl<T: Into<HighlightSpec>> From<Option<T>> for HighlightSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map_or(HighlightSpec::Empty, Into::into)
    }
}
