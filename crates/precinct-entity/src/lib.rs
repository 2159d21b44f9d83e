//! # precinct-entity
//!
//! Domain entity models for the Precinct records service. Every struct in
//! this crate represents a database table row or the input needed to create
//! one. Row types derive `sqlx::FromRow`; closed vocabularies (statuses,
//! ranks, urgency) are PostgreSQL enum types mapped with `sqlx::Type`.

pub mod audit;
pub mod case;
pub mod complaint;
pub mod duty;
pub mod officer;
pub mod resource;
