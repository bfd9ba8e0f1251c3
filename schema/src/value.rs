//! Runtime property values.

/// The stored count of a morphism list is its length minus this bias.
pub const MORPHISM_COUNT_BIAS: usize = 1;

/// A value held by a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    /// A string; `None` marks an absent string such as a hidden action.
    Text(Option<String>),
    /// A fixed-arity group of values.
    Tuple(Vec<PropertyValue>),
    /// A count-prefixed run of values.
    List(Vec<PropertyValue>),
    Morphisms(Morphisms),
}

impl PropertyValue {
    /// A short name for the value's shape.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Morphisms(_) => "morphisms",
        }
    }

    /// Builds a tuple of integers.
    pub fn int_tuple(values: impl IntoIterator<Item = i32>) -> Self {
        Self::Tuple(values.into_iter().map(Self::Int).collect())
    }

    /// Builds a list of integers.
    pub fn int_list(values: impl IntoIterator<Item = i32>) -> Self {
        Self::List(values.into_iter().map(Self::Int).collect())
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, or `None` for non-text and absent strings.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Returns the elements of a tuple or list.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Tuple(values) | Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the integers of a tuple or list of integers.
    #[must_use]
    pub fn to_ints(&self) -> Option<Vec<i32>> {
        self.as_slice()?.iter().map(Self::as_int).collect()
    }

    #[must_use]
    pub const fn as_morphisms(&self) -> Option<&Morphisms> {
        match self {
            Self::Morphisms(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_owned()))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(value: Option<String>) -> Self {
        Self::Text(value)
    }
}

impl From<Morphisms> for PropertyValue {
    fn from(value: Morphisms) -> Self {
        Self::Morphisms(value)
    }
}

/// The definitions a record can transform into, selected by a varbit or
/// varp at runtime. `-1` marks an absent id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Morphisms {
    pub varbit: i32,
    pub varp: i32,
    pub children: Vec<i32>,
}

impl Morphisms {
    #[must_use]
    pub const fn new(varbit: i32, varp: i32, children: Vec<i32>) -> Self {
        Self {
            varbit,
            varp,
            children,
        }
    }

    /// No selector and no children.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(-1, -1, Vec::new())
    }

    /// The count byte written for this list.
    #[must_use]
    pub fn stored_count(&self) -> Option<usize> {
        self.children.len().checked_sub(MORPHISM_COUNT_BIAS)
    }
}

impl Default for Morphisms {
    fn default() -> Self {
        Self::empty()
    }
}
