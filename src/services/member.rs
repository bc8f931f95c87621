//! Member search: listing, paging with default order, paging with caller sort.

use crate::domain::filter::MemberFilter;
use crate::domain::member::{MemberSearchCondition, MemberTeam};
use crate::domain::sort::{MemberSortField, UnknownSortFieldPolicy};
use crate::pagination::{Page, PageRequest};
use crate::repository::{MemberReader, MemberSort};
use crate::services::{SearchError, SearchResult};

/// Lists every member matching `condition`, ordered by member id.
pub fn search_members<R>(repo: &R, condition: &MemberSearchCondition) -> SearchResult<Vec<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let filter = MemberFilter::from(condition);

    repo.list_member_teams(&filter, &[]).map_err(|err| {
        log::error!("Failed to list members: {err}");
        SearchError::from(err)
    })
}

/// Returns one page of members matching `condition` in the default order.
///
/// Any sort carried by `request` is ignored.
pub fn search_members_page<R>(
    repo: &R,
    condition: &MemberSearchCondition,
    request: &PageRequest,
) -> SearchResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    fetch_page(repo, &MemberFilter::from(condition), &[], request)
}

/// Returns one page of members matching `condition`, ordered by the sort in
/// `request`.
///
/// Only fields of the member itself can be sorted on; other properties are
/// handled according to `policy`.
pub fn search_members_page_sorted<R>(
    repo: &R,
    condition: &MemberSearchCondition,
    request: &PageRequest,
    policy: UnknownSortFieldPolicy,
) -> SearchResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let order = request.sort().resolve::<MemberSortField>(policy)?;

    fetch_page(repo, &MemberFilter::from(condition), &order, request)
}

fn fetch_page<R>(
    repo: &R,
    filter: &MemberFilter,
    order: &[MemberSort],
    request: &PageRequest,
) -> SearchResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let counted = repo
        .page_member_teams(filter, order, request)
        .map_err(|err| {
            log::error!("Failed to fetch member page: {err}");
            SearchError::from(err)
        })?;

    counted.map_err(|failure| {
        log::error!(
            "Failed to count members after fetching {} rows: {}",
            failure.content.len(),
            failure.error
        );
        SearchError::CountFailed {
            content: failure.content,
            source: failure.error,
        }
    })
}
