//! Diesel queries over `members LEFT JOIN teams`.
//!
//! Content and count queries share the same filter. The count query selects
//! `count(members.id)` without ordering or windowing, and runs in the same
//! read transaction as the content query only when the page needs it.

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::filter::{MemberFilter, MemberPredicate};
use crate::domain::member::{MemberTeam, NewMember, NewTeam, Team};
use crate::domain::sort::{MemberSortField, NullOrdering, SortDirection};
use crate::domain::types::TypeConstraintError;
use crate::models::member::{
    MemberTeam as DbMemberTeam, NewMember as DbNewMember, NewTeam as DbNewTeam, Team as DbTeam,
};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CountedPage, DieselRepository, MemberReader, MemberSort, MemberWriter};
use crate::schema::{members, teams};

/// Narrows a boxed `members LEFT JOIN teams` query by every predicate of a
/// [`MemberFilter`]. `MatchAll` leaves the query untouched.
macro_rules! filter_member_teams {
    ($query:expr, $filter:expr) => {{
        let mut query = $query;
        for predicate in $filter.predicates() {
            query = match predicate {
                MemberPredicate::UsernameEq(username) => {
                    query.filter(members::username.eq(username.as_str()))
                }
                MemberPredicate::TeamNameEq(team_name) => {
                    query.filter(teams::name.eq(team_name.as_str()))
                }
                MemberPredicate::AgeGoe(age) => query.filter(members::age.ge(*age)),
                MemberPredicate::AgeLoe(age) => query.filter(members::age.le(*age)),
            };
        }
        query
    }};
}

/// Appends one column to the `ORDER BY` list. Null placement is rendered as
/// a leading `column IS NULL` key so it works on every SQLite version.
macro_rules! order_by_column {
    ($query:expr, $column:expr, $directive:expr) => {{
        let query = match $directive.nulls {
            NullOrdering::Native => $query,
            NullOrdering::First => $query.then_order_by($column.is_null().desc()),
            NullOrdering::Last => $query.then_order_by($column.is_null().asc()),
        };
        match $directive.direction {
            SortDirection::Asc => query.then_order_by($column.asc()),
            SortDirection::Desc => query.then_order_by($column.desc()),
        }
    }};
}

/// Applies the resolved directives in order, then `members.id ASC` as the
/// final tiebreaker.
macro_rules! order_member_teams {
    ($query:expr, $order:expr) => {{
        let mut query = $query;
        for directive in $order {
            query = match directive.field {
                MemberSortField::Id => order_by_column!(query, members::id, directive),
                MemberSortField::Username => {
                    order_by_column!(query, members::username, directive)
                }
                MemberSortField::Age => order_by_column!(query, members::age, directive),
            };
        }
        query.then_order_by(members::id.asc())
    }};
}

/// Starts the projection query; team columns are nullable through the left join.
macro_rules! member_team_projection {
    () => {
        members::table
            .left_join(teams::table)
            .select((
                members::id,
                members::username,
                members::age,
                teams::id.nullable(),
                teams::name.nullable(),
            ))
            .into_boxed()
    };
}

fn into_domain(rows: Vec<DbMemberTeam>) -> Result<Vec<MemberTeam>, TypeConstraintError> {
    rows.into_iter().map(MemberTeam::try_from).collect()
}

fn describe(order: &[MemberSort]) -> String {
    order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl MemberReader for DieselRepository {
    fn list_member_teams(
        &self,
        filter: &MemberFilter,
        order: &[MemberSort],
    ) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;

        log::debug!("Listing members ordered by [{}]", describe(order));

        let query = filter_member_teams!(member_team_projection!(), filter);
        let rows = order_member_teams!(query, order).load::<DbMemberTeam>(&mut conn)?;

        Ok(into_domain(rows)?)
    }

    fn page_member_teams(
        &self,
        filter: &MemberFilter,
        order: &[MemberSort],
        request: &PageRequest,
    ) -> RepositoryResult<CountedPage<MemberTeam>> {
        let mut conn = self.conn()?;

        log::debug!(
            "Paging members offset {} limit {} ordered by [{}]",
            request.offset(),
            request.limit(),
            describe(order)
        );

        let counted = conn.transaction::<_, DieselError, _>(|conn| {
            let query = filter_member_teams!(member_team_projection!(), filter);
            let rows = order_member_teams!(query, order)
                .offset(request.offset() as i64)
                .limit(request.limit() as i64)
                .load::<DbMemberTeam>(conn)?;
            let content =
                into_domain(rows).map_err(|e| DieselError::DeserializationError(Box::new(e)))?;

            let count_query = filter_member_teams!(
                members::table
                    .left_join(teams::table)
                    .select(count(members::id))
                    .into_boxed(),
                filter
            );

            Ok(Page::from_content(content, request, move || {
                count_query
                    .get_result::<i64>(conn)
                    .map(|total| total as usize)
                    .map_err(RepositoryError::from)
            }))
        })?;

        Ok(counted)
    }
}

impl MemberWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        let mut conn = self.conn()?;

        let db_team = diesel::insert_into(teams::table)
            .values(DbNewTeam::from(new_team))
            .get_result::<DbTeam>(&mut conn)?;

        Ok(Team::try_from(db_team)?)
    }

    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let insertables: Vec<DbNewMember> = new_members.iter().map(Into::into).collect();
        let affected = diesel::insert_into(members::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
