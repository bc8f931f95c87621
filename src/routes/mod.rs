use actix_web::web;

pub mod member;

/// Registers the member search endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(member::search_members_v1)
        .service(member::search_members_v2)
        .service(member::search_members_v3);
}
