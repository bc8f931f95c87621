//! Composition of member search predicates.
//!
//! A [`MemberSearchCondition`] is turned into a [`MemberFilter`]: either
//! [`MemberFilter::MatchAll`] when nothing is constrained, or the conjunction
//! of the predicates for the fields that are present. A filter value always
//! exists, so storage code never has to interpret a missing filter.

use crate::domain::member::{MemberSearchCondition, MemberTeam};
use crate::domain::types::SearchText;

/// A single clause of a member filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberPredicate {
    /// `members.username = value`
    UsernameEq(SearchText),
    /// `teams.name = value`
    TeamNameEq(SearchText),
    /// `members.age >= value`
    AgeGoe(i32),
    /// `members.age <= value`
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Evaluates the clause against an already projected row.
    ///
    /// Mirrors SQL semantics: a comparison with a missing value is never true.
    pub fn matches(&self, row: &MemberTeam) -> bool {
        match self {
            Self::UsernameEq(username) => row.username.as_deref() == Some(username.as_str()),
            Self::TeamNameEq(team_name) => row.team_name.as_deref() == Some(team_name.as_str()),
            Self::AgeGoe(age) => row.age >= *age,
            Self::AgeLoe(age) => row.age <= *age,
        }
    }
}

/// Filter applied to both the content and the count query of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MemberFilter {
    /// No constraint was supplied; every row qualifies.
    #[default]
    MatchAll,
    /// Logical AND of the contained predicates. Never empty.
    All(Vec<MemberPredicate>),
}

impl MemberFilter {
    /// Builds a filter from predicates, collapsing an empty list to [`MemberFilter::MatchAll`].
    pub fn all(predicates: Vec<MemberPredicate>) -> Self {
        if predicates.is_empty() {
            Self::MatchAll
        } else {
            Self::All(predicates)
        }
    }

    pub fn predicates(&self) -> &[MemberPredicate] {
        match self {
            Self::MatchAll => &[],
            Self::All(predicates) => predicates,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll)
    }

    pub fn matches(&self, row: &MemberTeam) -> bool {
        self.predicates().iter().all(|predicate| predicate.matches(row))
    }
}

impl From<&MemberSearchCondition> for MemberFilter {
    fn from(condition: &MemberSearchCondition) -> Self {
        let username = condition.username.clone().map(MemberPredicate::UsernameEq);
        let team_name = condition.team_name.clone().map(MemberPredicate::TeamNameEq);
        let age_goe = condition.age_goe.map(MemberPredicate::AgeGoe);
        let age_loe = condition.age_loe.map(MemberPredicate::AgeLoe);

        Self::all(
            [username, team_name, age_goe, age_loe]
                .into_iter()
                .flatten()
                .collect(),
        )
    }
}
