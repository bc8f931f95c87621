//! Caller-supplied sort requests and their translation into sort directives.
//!
//! A [`SortRequest`] is an ordered list of `(property, direction)` pairs as
//! received from a caller. Translation resolves each property against a closed
//! set of sortable fields (see [`SortField`]); nothing stringly-typed reaches
//! the storage layer.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Placement of rows whose sort key is null. Opt-in per field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// Whatever the store does by default.
    #[default]
    Native,
    First,
    Last,
}

/// One requested sort key, not yet resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
            nulls: NullOrdering::Native,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
            nulls: NullOrdering::Native,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortParseError {
    #[error("sort parameter is empty")]
    EmptyProperty,
    #[error("unrecognised sort modifier `{0}`")]
    UnknownModifier(String),
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    /// Parses `property[,asc|desc][,nullsfirst|nullslast]`, case-insensitive
    /// for the modifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = parts
            .next()
            .filter(|property| !property.is_empty())
            .ok_or(SortParseError::EmptyProperty)?;

        let mut order = SortOrder::asc(property);
        for modifier in parts.filter(|part| !part.is_empty()) {
            match modifier.to_ascii_lowercase().as_str() {
                "asc" => order.direction = SortDirection::Asc,
                "desc" => order.direction = SortDirection::Desc,
                "nullsfirst" => order.nulls = NullOrdering::First,
                "nullslast" => order.nulls = NullOrdering::Last,
                _ => return Err(SortParseError::UnknownModifier(modifier.to_string())),
            }
        }
        Ok(order)
    }
}

/// Ordered list of sort keys; the first entry is the primary key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortRequest(Vec<SortOrder>);

impl SortRequest {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<SortOrder>) -> Self {
        Self(orders)
    }

    /// Parses raw `sort` query values, skipping blank ones.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, SortParseError> {
        values
            .iter()
            .map(|value| value.as_ref())
            .filter(|value| !value.trim().is_empty())
            .map(str::parse::<SortOrder>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.0
    }

    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves every requested property against `F`.
    ///
    /// Unknown properties are dropped or rejected according to `policy`; the
    /// relative order of the resolved directives matches the request.
    pub fn resolve<F: SortField>(
        &self,
        policy: UnknownSortFieldPolicy,
    ) -> Result<Vec<SortDirective<F>>, UnsupportedSortField> {
        let mut directives = Vec::with_capacity(self.0.len());
        for order in &self.0 {
            match F::from_property(&order.property) {
                Some(field) => directives.push(SortDirective {
                    field,
                    direction: order.direction,
                    nulls: order.nulls,
                }),
                None if policy == UnknownSortFieldPolicy::Skip => {
                    log::warn!("Ignoring unsupported sort property `{}`", order.property);
                }
                None => return Err(UnsupportedSortField(order.property.clone())),
            }
        }
        Ok(directives)
    }
}

/// What to do with sort properties that do not name a sortable field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSortFieldPolicy {
    /// Drop the property and keep the rest of the request.
    #[default]
    Skip,
    /// Fail the whole request.
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported sort property `{0}`")]
pub struct UnsupportedSortField(pub String);

/// Closed set of fields of one entity that may be sorted on.
pub trait SortField: Copy + Sized {
    fn from_property(property: &str) -> Option<Self>;

    fn property(self) -> &'static str;
}

/// Sortable fields of the member entity. Fields of joined entities are not
/// sortable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberSortField {
    Id,
    Username,
    Age,
}

impl SortField for MemberSortField {
    fn from_property(property: &str) -> Option<Self> {
        match property {
            "id" => Some(Self::Id),
            "username" => Some(Self::Username),
            "age" => Some(Self::Age),
            _ => None,
        }
    }

    fn property(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::Age => "age",
        }
    }
}

/// A resolved sort key ready for an `ORDER BY` clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortDirective<F> {
    pub field: F,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl<F: SortField> Display for SortDirective<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{} {direction}", self.field.property())?;
        match self.nulls {
            NullOrdering::Native => Ok(()),
            NullOrdering::First => write!(f, " nulls first"),
            NullOrdering::Last => write!(f, " nulls last"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_property_direction_and_nulls() {
        let order: SortOrder = "username,ASC,nullsLast".parse().expect("valid sort");

        assert_eq!(order, SortOrder::asc("username").nulls_last());
    }

    #[test]
    fn bare_property_defaults_to_ascending() {
        let request = SortRequest::parse(&["age", "", "username,desc"]).expect("valid sort");

        assert_eq!(
            request.orders(),
            &[SortOrder::asc("age"), SortOrder::desc("username")]
        );
    }

    #[test]
    fn rejects_unknown_modifiers() {
        assert_eq!(
            "age,sideways".parse::<SortOrder>(),
            Err(SortParseError::UnknownModifier("sideways".to_string()))
        );
        assert_eq!(",desc".parse::<SortOrder>(), Err(SortParseError::EmptyProperty));
    }

    #[test]
    fn resolution_keeps_request_order() {
        let request = SortRequest::by(vec![
            SortOrder::desc("age"),
            SortOrder::asc("username").nulls_last(),
        ]);

        let directives = request
            .resolve::<MemberSortField>(UnknownSortFieldPolicy::Skip)
            .expect("known fields");

        assert_eq!(
            directives,
            vec![
                SortDirective {
                    field: MemberSortField::Age,
                    direction: SortDirection::Desc,
                    nulls: NullOrdering::Native,
                },
                SortDirective {
                    field: MemberSortField::Username,
                    direction: SortDirection::Asc,
                    nulls: NullOrdering::Last,
                },
            ]
        );
    }

    #[test]
    fn skip_policy_drops_unknown_and_joined_properties() {
        let request = SortRequest::by(vec![
            SortOrder::asc("team.name"),
            SortOrder::desc("age"),
            SortOrder::asc("password; drop table members"),
        ]);

        let first = request
            .resolve::<MemberSortField>(UnknownSortFieldPolicy::Skip)
            .expect("skip never fails");
        let second = request
            .resolve::<MemberSortField>(UnknownSortFieldPolicy::Skip)
            .expect("skip never fails");

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].field, MemberSortField::Age);
        assert_eq!(first, second);
    }

    #[test]
    fn reject_policy_names_the_offending_property() {
        let request = SortRequest::by(vec![SortOrder::asc("age"), SortOrder::asc("teamName")]);

        assert_eq!(
            request.resolve::<MemberSortField>(UnknownSortFieldPolicy::Reject),
            Err(UnsupportedSortField("teamName".to_string()))
        );
    }

    #[test]
    fn directive_renders_readably() {
        let directive = SortDirective {
            field: MemberSortField::Username,
            direction: SortDirection::Asc,
            nulls: NullOrdering::Last,
        };

        assert_eq!(directive.to_string(), "username asc nulls last");
    }
}
