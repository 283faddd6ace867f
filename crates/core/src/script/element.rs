//! Tree node produced by the script parser.

use serde::Serialize;

/// One node of a parsed script.
///
/// A node is exactly one of a bare scalar, a `key = value` pair, or a
/// `key = { ... }` block. Values and children never coexist.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// A bare token with no key, e.g. an entry of a `last_mods` list.
    Scalar { value: String },
    /// `key = value`. `value` is `None` when the value token was empty
    /// (`key = ""`) and `Some("")` when the input ended right after `=`.
    KeyValue { key: String, value: Option<String> },
    /// `key = { ... }`.
    KeyBlock { key: String, children: Vec<Element> },
}

impl Element {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar {
            value: value.into(),
        }
    }

    pub fn key_value(key: impl Into<String>, value: Option<String>) -> Self {
        Self::KeyValue {
            key: key.into(),
            value,
        }
    }

    pub fn key_block(key: impl Into<String>, children: Vec<Element>) -> Self {
        Self::KeyBlock {
            key: key.into(),
            children,
        }
    }

    /// The key, or `None` for scalars.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Scalar { .. } => None,
            Self::KeyValue { key, .. } | Self::KeyBlock { key, .. } => Some(key),
        }
    }

    /// The scalar payload: the bare token of a scalar or the value of a
    /// `key = value` pair. Blocks have none.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Scalar { value } => Some(value),
            Self::KeyValue { value, .. } => value.as_deref(),
            Self::KeyBlock { .. } => None,
        }
    }

    /// Child elements of a block; empty for every other variant.
    pub fn children(&self) -> &[Element] {
        match self {
            Self::KeyBlock { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    pub fn is_key_value(&self) -> bool {
        matches!(self, Self::KeyValue { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Self::KeyBlock { .. })
    }

    /// First child whose key matches `key` ignoring case.
    pub fn get(&self, key: &str) -> Option<&Element> {
        find_by_key(self.children(), key)
    }

    /// Bare values listed in a block, in order (`tags = { "a" "b" }`).
    pub fn scalar_values(&self) -> impl Iterator<Item = &str> {
        self.children().iter().filter_map(|child| match child {
            Element::Scalar { value } => Some(value.as_str()),
            _ => None,
        })
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar { value } => write!(f, "{}", value),
            Self::KeyValue { key, value } => {
                write!(f, "{} = {}", key, value.as_deref().unwrap_or(""))
            }
            Self::KeyBlock { key, .. } => write!(f, "{} = {{ }}", key),
        }
    }
}

/// Linear, case-insensitive, first-match lookup shared by blocks and
/// documents. Duplicate keys resolve to the earliest occurrence.
pub(crate) fn find_by_key<'a>(elements: &'a [Element], key: &str) -> Option<&'a Element> {
    elements
        .iter()
        .find(|e| e.key().is_some_and(|k| k.eq_ignore_ascii_case(key)))
}
