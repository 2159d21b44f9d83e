//! HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod case;
pub mod complaint;
pub mod dashboard;
pub mod duty;
pub mod health;
pub mod investigation;
pub mod officer;
pub mod request;
pub mod resource;
