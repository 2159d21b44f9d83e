//! Route definitions for the Precinct HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router. Layers that need configuration are added by
/// [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(officer_routes())
        .merge(complaint_routes())
        .merge(case_routes())
        .merge(investigation_routes())
        .merge(resource_routes())
        .merge(request_routes())
        .merge(duty_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: login, logout, me, own password
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/password", put(handlers::auth::change_password))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard::dashboard))
}

/// Officer accounts
fn officer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/officers",
            get(handlers::officer::list_officers).post(handlers::officer::create_officer),
        )
        .route(
            "/officers/{id}",
            get(handlers::officer::get_officer).patch(handlers::officer::update_officer),
        )
        .route(
            "/officers/{id}/password",
            put(handlers::officer::reset_password),
        )
        .route(
            "/officers/{id}/disable",
            post(handlers::officer::disable_officer),
        )
        .route("/officers/{id}/enable", post(handlers::officer::enable_officer))
}

/// Complaint intake and promotion to cases
fn complaint_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/complaints",
            get(handlers::complaint::list_complaints).post(handlers::complaint::file_complaint),
        )
        .route("/complaints/{id}", get(handlers::complaint::get_complaint))
        .route(
            "/complaints/{id}/status",
            put(handlers::complaint::update_complaint_status),
        )
        .route(
            "/complaints/{id}/case",
            post(handlers::complaint::create_case_from_complaint),
        )
}

/// Cases and their assignments
fn case_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cases",
            get(handlers::case::list_cases).post(handlers::case::create_case),
        )
        .route("/cases/{id}", get(handlers::case::get_case))
        .route("/cases/{id}/status", put(handlers::case::update_case_status))
        .route(
            "/cases/{id}/assignments",
            get(handlers::case::list_assignments).post(handlers::case::assign_officer),
        )
        .route(
            "/cases/{id}/investigations",
            post(handlers::case::open_investigation),
        )
        .route(
            "/assignments/{id}/complete",
            post(handlers::case::complete_assignment),
        )
}

fn investigation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/investigations",
            get(handlers::investigation::list_investigations),
        )
        .route(
            "/investigations/{id}",
            get(handlers::investigation::get_investigation),
        )
        .route(
            "/investigations/{id}/complete",
            post(handlers::investigation::complete_investigation),
        )
}

/// Inventory
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            get(handlers::resource::list_resources).post(handlers::resource::add_resource),
        )
        .route("/resources/{id}", get(handlers::resource::get_resource))
        .route("/resources/{id}/stock", put(handlers::resource::update_stock))
}

/// Allocation requests
fn request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resource-requests",
            get(handlers::request::list_requests).post(handlers::request::create_request),
        )
        .route("/resource-requests/{id}", get(handlers::request::get_request))
        .route(
            "/resource-requests/{id}/approve",
            post(handlers::request::approve_request),
        )
        .route(
            "/resource-requests/{id}/reject",
            post(handlers::request::reject_request),
        )
}

fn duty_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/duties",
            get(handlers::duty::list_duties).post(handlers::duty::schedule_duty),
        )
        .route("/duties/{id}", get(handlers::duty::get_duty))
}

fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/access-logs", get(handlers::admin::list_access_logs))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
