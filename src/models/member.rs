use diesel::prelude::*;

use crate::domain::member::{
    MemberTeam as DomainMemberTeam, NewMember as DomainNewMember, NewTeam as DomainNewTeam,
    Team as DomainTeam,
};
use crate::domain::types::{MemberId, TeamId, TypeConstraintError};

/// Row produced by the member/team projection.
///
/// Both tables expose an `id`; the projection selects them as `member_id` and
/// `team_id` so the flat row stays unambiguous. The team columns are null for
/// members without a team.
#[derive(Debug, Clone, Queryable)]
pub struct MemberTeam {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::teams)]
/// Diesel model for [`crate::domain::member::Team`].
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam<'a> {
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
pub struct NewMember<'a> {
    pub username: Option<&'a str>,
    pub age: i32,
    pub team_id: Option<i32>,
}

impl TryFrom<MemberTeam> for DomainMemberTeam {
    type Error = TypeConstraintError;

    fn try_from(row: MemberTeam) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: MemberId::new(row.member_id)?,
            username: row.username,
            age: row.age,
            team_id: row.team_id.map(TeamId::new).transpose()?,
            team_name: row.team_name,
        })
    }
}

impl TryFrom<Team> for DomainTeam {
    type Error = TypeConstraintError;

    fn try_from(team: Team) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TeamId::new(team.id)?,
            name: team.name,
        })
    }
}

impl<'a> From<&'a DomainNewTeam> for NewTeam<'a> {
    fn from(team: &'a DomainNewTeam) -> Self {
        Self {
            name: team.name.as_str(),
        }
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            username: member.username.as_deref(),
            age: member.age.get(),
            team_id: member.team_id.map(TeamId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Age, TeamName};

    fn row(team: Option<(i32, &str)>) -> MemberTeam {
        MemberTeam {
            member_id: 5,
            username: Some("member5".to_string()),
            age: 100,
            team_id: team.map(|(id, _)| id),
            team_name: team.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn projection_row_maps_one_to_one() {
        let member = DomainMemberTeam::try_from(row(Some((2, "teamB")))).expect("valid row");

        assert_eq!(member.member_id.get(), 5);
        assert_eq!(member.username.as_deref(), Some("member5"));
        assert_eq!(member.age, 100);
        assert_eq!(member.team_id.map(TeamId::get), Some(2));
        assert_eq!(member.team_name.as_deref(), Some("teamB"));
    }

    #[test]
    fn member_without_team_keeps_null_team_columns() {
        let member = DomainMemberTeam::try_from(row(None)).expect("valid row");

        assert!(member.team_id.is_none());
        assert!(member.team_name.is_none());
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        let mut invalid = row(None);
        invalid.member_id = 0;

        assert_eq!(
            DomainMemberTeam::try_from(invalid),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn insertables_borrow_domain_values() {
        let team = DomainNewTeam::new(TeamName::new("teamA").expect("valid name"));
        let member = DomainNewMember::new(
            None,
            Age::new(30).expect("valid age"),
            Some(TeamId::new(1).expect("valid id")),
        );

        let db_team = NewTeam::from(&team);
        let db_member = NewMember::from(&member);

        assert_eq!(db_team.name, "teamA");
        assert_eq!(db_member.username, None);
        assert_eq!(db_member.age, 30);
        assert_eq!(db_member.team_id, Some(1));
    }
}
