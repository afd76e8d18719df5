//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod identity;
pub mod members;
pub mod messages;
pub mod projects;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api` scope with JSON and query error handlers that
/// produce the standard error envelope.
///
/// Callers supply [`state::HttpState`] as app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
            .service(auth::register)
            .service(auth::login)
            .service(users::get_user)
            .service(users::update_user)
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project)
            .service(members::apply)
            .service(members::accept)
            .service(members::reject)
            .service(messages::list_messages)
            .service(messages::post_message),
    );
}
