use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::filter::MemberFilter;
use crate::domain::member::{MemberTeam, NewMember, NewTeam, Team};
use crate::domain::sort::{MemberSortField, SortDirective};
use crate::pagination::{CountFailure, Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod member;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub type MemberSort = SortDirective<MemberSortField>;

/// Outcome of a page query whose content was fetched.
///
/// `Err` means only the count query failed; the fetched content travels with
/// the error.
pub type CountedPage<T> = Result<Page<T>, CountFailure<T, RepositoryError>>;

/// Diesel-backed repository over the member store.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait MemberReader {
    /// Every member matching `filter`, ordered by `order` then by member id.
    fn list_member_teams(
        &self,
        filter: &MemberFilter,
        order: &[MemberSort],
    ) -> RepositoryResult<Vec<MemberTeam>>;

    /// One window of members matching `filter` together with the exact total.
    ///
    /// The count query is issued only when the fetched window cannot
    /// determine the total.
    fn page_member_teams(
        &self,
        filter: &MemberFilter,
        order: &[MemberSort],
        request: &PageRequest,
    ) -> RepositoryResult<CountedPage<MemberTeam>>;
}

pub trait MemberWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
}
