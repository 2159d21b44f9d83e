//! # precinct-database
//!
//! Persistence for the Precinct records service.
//!
//! Managers talk to the store traits in [`store`]; two backends implement
//! them:
//!
//! - **postgres**: [`repositories`] over a `sqlx::PgPool`
//! - **memory**: [`memory::MemoryDatabase`], used for demos and tests
//!
//! The backend is selected at startup from `database.provider` by
//! [`Database::connect`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Database;
