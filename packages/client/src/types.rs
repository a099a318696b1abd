//! Closed symbolic values used to build search queries.
//!
//! Every type here is a small enum over the exact set of values the API
//! understands. Raw strings are converted with `TryFrom`, which is the single
//! place a value is checked for membership in its set.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationFailure;

/// Comparison operator used in a filter [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
}

impl Operator {
    pub const ALL: [Self; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Less,
        Self::LessEqual,
    ];

    /// Symbol written into the tag-string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        }
    }
}

/// Field a [`Condition`] can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Id,
    Score,
    Height,
    Width,
    Parent,
    Updated,
}

impl FilterField {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Score,
        Self::Height,
        Self::Width,
        Self::Parent,
        Self::Updated,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Score => "score",
            Self::Height => "height",
            Self::Width => "width",
            Self::Parent => "parent",
            Self::Updated => "updated",
        }
    }
}

/// Field search results can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Score,
    Rating,
    User,
    Height,
    Width,
    Parent,
    Source,
    Updated,
}

impl SortField {
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::Score,
        Self::Rating,
        Self::User,
        Self::Height,
        Self::Width,
        Self::Parent,
        Self::Source,
        Self::Updated,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Score => "score",
            Self::Rating => "rating",
            Self::User => "user",
            Self::Height => "height",
            Self::Width => "width",
            Self::Parent => "parent",
            Self::Source => "source",
            Self::Updated => "updated",
        }
    }
}

/// Direction of a sort directive. Descending when not chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Content rating of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Safe,
    Questionable,
    Explicit,
}

impl Rating {
    pub const ALL: [Self; 3] = [Self::Safe, Self::Questionable, Self::Explicit];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Questionable => "questionable",
            Self::Explicit => "explicit",
        }
    }
}

/// Look up `value` in a closed set by its wire spelling.
fn lookup<T: Copy>(all: &[T], value: &str, as_str: fn(&T) -> &'static str) -> Option<T> {
    all.iter().find(|candidate| as_str(*candidate) == value).copied()
}

macro_rules! symbolic {
    ($ty:ty, $failure:path) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = ValidationFailure;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                lookup(&<$ty>::ALL, value, <$ty>::as_str)
                    .ok_or_else(|| $failure(value.to_string()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationFailure;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationFailure;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::try_from(value)
            }
        }
    };
}

symbolic!(Operator, ValidationFailure::UnknownOperator);
symbolic!(FilterField, ValidationFailure::UnknownFilterField);
symbolic!(SortField, ValidationFailure::UnknownSortField);
symbolic!(SortOrder, ValidationFailure::UnknownSortOrder);
symbolic!(Rating, ValidationFailure::UnknownRating);

/// A single `field:<op>argument` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: FilterField,
    pub operator: Operator,
    pub argument: i64,
}

impl Condition {
    #[must_use]
    pub fn new(field: FilterField, operator: Operator, argument: i64) -> Self {
        Self {
            field,
            operator,
            argument,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.field, self.operator, self.argument)
    }
}
