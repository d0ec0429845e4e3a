use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\].]+").expect("invalid path separator pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("json pointer '{0}' must start with '/'")]
    InvalidPointer(String),
    #[error("{path}: segment '{segment}' cannot index a repeated group")]
    NotAnIndex { path: String, segment: String },
    #[error("{path}: expected a repeated group, found a record")]
    NotAGroup { path: String },
}

/// Location of a node inside a value tree.
///
/// Parsed from strings such as `schemaList[0].secondLevel[1].name`: any run
/// of `.`, `[` and `]` separates two segments. Segments stay untyped; whether
/// `0` is a field name or an index is decided by the node it is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        Self {
            segments: SEPARATORS
                .split(raw)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a path from an RFC 6901 pointer such as `/schemaList/0/config`.
    pub fn from_pointer(pointer: &str) -> Result<Self, PathError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PathError::InvalidPointer(pointer.to_string()));
        };
        Ok(Self {
            segments: rest
                .split('/')
                .map(|token| token.replace("~1", "/").replace("~0", "~"))
                .collect(),
        })
    }

    pub fn to_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Last segment that names a field, skipping trailing indices.
    pub fn last_field(&self) -> Option<&str> {
        self.segments
            .iter()
            .rev()
            .find(|segment| index_of(segment).is_none())
            .map(String::as_str)
    }

    pub fn parent(&self) -> Option<FieldPath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, name: impl Into<String>) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn index(&self, index: usize) -> FieldPath {
        self.child(index.to_string())
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Every proper prefix, shortest first. The root is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = FieldPath> + '_ {
        (1..self.segments.len()).map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }
}

/// Interpret a segment as a zero-based index. Only plain ASCII digits count.
pub(crate) fn index_of(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if index_of(segment).is_some() {
                write!(f, "[{segment}]")?;
            } else if position == 0 {
                write!(f, "{segment}")?;
            } else {
                write!(f, ".{segment}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
