use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use validator::Validate;

use crate::dto::member::{ErrorDto, PageDto};
use crate::forms::member::MemberSearchForm;
use crate::models::config::SearchSettings;
use crate::repository::DieselRepository;
use crate::services::SearchError;
use crate::services::member::{search_members, search_members_page, search_members_page_sorted};

fn parse_form(req: &HttpRequest) -> Result<MemberSearchForm, HttpResponse> {
    let form = MemberSearchForm::from_query(req.query_string()).map_err(|e| {
        log::warn!("Rejected search query '{}': {e}", req.query_string());
        error_response(e)
    })?;

    form.validate().map_err(|e| {
        log::warn!("Search form failed validation: {e}");
        HttpResponse::BadRequest().json(ErrorDto::new(e))
    })?;

    Ok(form)
}

fn error_response(err: SearchError) -> HttpResponse {
    match err {
        SearchError::InvalidRequest(_) | SearchError::UnsupportedSortField(_) => {
            HttpResponse::BadRequest().json(ErrorDto::new(err))
        }
        SearchError::Storage(_) | SearchError::CountFailed { .. } => {
            log::error!("Member search failed: {err}");
            HttpResponse::InternalServerError().json(ErrorDto::new(err))
        }
    }
}

#[get("/v1/members")]
pub async fn search_members_v1(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = match parse_form(&req) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match search_members(repo.get_ref(), &form.condition()) {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(err) => error_response(err),
    }
}

/// Paged search in member id order; `sort` parameters are accepted but ignored.
#[get("/v2/members")]
pub async fn search_members_v2(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    settings: web::Data<SearchSettings>,
) -> impl Responder {
    let form = match parse_form(&req) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let request = match form.page_request(&settings) {
        Ok(request) => request,
        Err(err) => return error_response(err),
    };

    match search_members_page(repo.get_ref(), &form.condition(), &request) {
        Ok(page) => HttpResponse::Ok().json(PageDto::from(page)),
        Err(err) => error_response(err),
    }
}

#[get("/v3/members")]
pub async fn search_members_v3(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    settings: web::Data<SearchSettings>,
) -> impl Responder {
    let form = match parse_form(&req) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let request = match form.page_request(&settings) {
        Ok(request) => request,
        Err(err) => return error_response(err),
    };

    match search_members_page_sorted(
        repo.get_ref(),
        &form.condition(),
        &request,
        settings.unknown_sort_fields,
    ) {
        Ok(page) => HttpResponse::Ok().json(PageDto::from(page)),
        Err(err) => error_response(err),
    }
}
