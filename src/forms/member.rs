use serde::Deserialize;
use validator::Validate;

use crate::domain::member::MemberSearchCondition;
use crate::domain::sort::SortRequest;
use crate::domain::types::SearchText;
use crate::models::config::SearchSettings;
use crate::pagination::PageRequest;
use crate::services::{SearchError, SearchResult};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Query parameters of the member search endpoints.
pub struct MemberSearchForm {
    /// Exact username; blank means no constraint.
    #[validate(length(max = 255))]
    pub username: Option<String>,
    /// Exact team name; blank means no constraint.
    #[validate(length(max = 255))]
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    /// Zero-based page number; ignored when `offset` is given.
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub offset: Option<i64>,
    /// Repeated `property[,asc|desc][,nullsfirst|nullslast]` values.
    #[serde(default)]
    pub sort: Vec<String>,
}

impl MemberSearchForm {
    /// Parses a raw query string; repeated keys such as `sort` are collected.
    pub fn from_query(query: &str) -> SearchResult<Self> {
        serde_html_form::from_str(query).map_err(|e| SearchError::InvalidRequest(e.to_string()))
    }

    pub fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            username: SearchText::from_optional(self.username.clone()),
            team_name: SearchText::from_optional(self.team_name.clone()),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }

    /// Builds the page window, clamping the size to the configured maximum.
    pub fn page_request(&self, settings: &SearchSettings) -> SearchResult<PageRequest> {
        let size = self
            .size
            .unwrap_or(settings.default_page_size)
            .min(settings.max_page_size);

        let request = match self.offset {
            Some(offset) => PageRequest::new(offset, size)?,
            None => PageRequest::of_page(self.page.unwrap_or(0), size)?,
        };

        Ok(request.with_sort(SortRequest::parse(&self.sort)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sort::SortOrder;

    #[test]
    fn parses_repeated_sort_keys() {
        let form = MemberSearchForm::from_query(
            "username=member1&ageGoe=20&sort=age,desc&sort=username,asc,nullslast",
        )
        .expect("valid query");

        assert_eq!(form.username.as_deref(), Some("member1"));
        assert_eq!(form.age_goe, Some(20));
        assert_eq!(form.sort, vec!["age,desc", "username,asc,nullslast"]);

        let request = form
            .page_request(&SearchSettings::default())
            .expect("valid page");
        assert_eq!(
            request.sort().orders(),
            &[
                SortOrder::desc("age"),
                SortOrder::asc("username").nulls_last()
            ]
        );
    }

    #[test]
    fn blank_text_leaves_condition_unconstrained() {
        let form = MemberSearchForm::from_query("username=&teamName=%20%20").expect("valid query");

        assert!(form.condition().is_unconstrained());
    }

    #[test]
    fn page_defaults_and_clamping() {
        let settings = SearchSettings {
            default_page_size: 20,
            max_page_size: 50,
            ..SearchSettings::default()
        };

        let defaulted = MemberSearchForm::default()
            .page_request(&settings)
            .expect("valid page");
        assert_eq!((defaulted.offset(), defaulted.limit()), (0, 20));

        let clamped = MemberSearchForm {
            page: Some(2),
            size: Some(500),
            ..MemberSearchForm::default()
        }
        .page_request(&settings)
        .expect("valid page");
        assert_eq!((clamped.offset(), clamped.limit()), (100, 50));
    }

    #[test]
    fn explicit_offset_wins_over_page() {
        let request = MemberSearchForm {
            page: Some(5),
            size: Some(10),
            offset: Some(2),
            ..MemberSearchForm::default()
        }
        .page_request(&SearchSettings::default())
        .expect("valid page");

        assert_eq!((request.offset(), request.limit()), (2, 10));
    }

    #[test]
    fn invalid_window_is_an_invalid_request() {
        let zero_size = MemberSearchForm {
            size: Some(0),
            ..MemberSearchForm::default()
        };
        let negative_offset = MemberSearchForm {
            offset: Some(-1),
            ..MemberSearchForm::default()
        };
        let bad_sort = MemberSearchForm {
            sort: vec!["age,sideways".to_string()],
            ..MemberSearchForm::default()
        };

        for form in [zero_size, negative_offset, bad_sort] {
            assert!(matches!(
                form.page_request(&SearchSettings::default()),
                Err(SearchError::InvalidRequest(_))
            ));
        }
    }

    #[test]
    fn malformed_number_is_an_invalid_request() {
        assert!(matches!(
            MemberSearchForm::from_query("ageGoe=twenty"),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn overly_long_username_fails_validation() {
        let form = MemberSearchForm {
            username: Some("x".repeat(256)),
            ..MemberSearchForm::default()
        };

        assert!(form.validate().is_err());
    }
}
