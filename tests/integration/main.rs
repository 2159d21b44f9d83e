//! HTTP integration tests. Every test drives the full router against the
//! in-memory backend.

mod helpers;

mod auth_test;
mod case_test;
mod dashboard_test;
mod officer_test;
mod resource_test;
