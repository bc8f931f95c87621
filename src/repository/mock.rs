//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::filter::MemberFilter;
use crate::domain::member::{MemberTeam, NewMember, NewTeam, Team};
use crate::pagination::PageRequest;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CountedPage, MemberReader, MemberSort, MemberWriter};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn list_member_teams(
            &self,
            filter: &MemberFilter,
            order: &[MemberSort],
        ) -> RepositoryResult<Vec<MemberTeam>>;
        fn page_member_teams(
            &self,
            filter: &MemberFilter,
            order: &[MemberSort],
            request: &PageRequest,
        ) -> RepositoryResult<CountedPage<MemberTeam>>;
    }

    impl MemberWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
        fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
    }
}
