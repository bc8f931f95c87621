//! Members, teams and the search condition used to query them.

use serde::Serialize;

use crate::domain::types::{Age, MemberId, SearchText, TeamId, TeamName};

/// Optional constraints on a member search.
///
/// Every field is independent: `None` means "no constraint on this field",
/// never "match an empty or zero value".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    pub username: Option<SearchText>,
    pub team_name: Option<SearchText>,
    /// Inclusive lower bound on the member age.
    pub age_goe: Option<i32>,
    /// Inclusive upper bound on the member age.
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// A condition without constraints; matches every member.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank input leaves the username unconstrained.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = SearchText::from_optional(Some(username));
        self
    }

    /// Blank input leaves the team name unconstrained.
    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = SearchText::from_optional(Some(team_name));
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.username.is_none()
            && self.team_name.is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

/// Flat projection of a member joined with its (optional) team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct NewTeam {
    pub name: TeamName,
}

impl NewTeam {
    pub fn new(name: TeamName) -> Self {
        Self { name }
    }
}

#[derive(Clone, Debug)]
pub struct NewMember {
    /// Members may be stored without a name.
    pub username: Option<String>,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Option<&str>, age: Age, team_id: Option<TeamId>) -> Self {
        Self {
            username: username.map(str::to_string),
            age,
            team_id,
        }
    }
}
