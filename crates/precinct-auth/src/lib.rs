//! # precinct-auth
//!
//! Identity and authorization for the Precinct records service.
//!
//! ## Modules
//!
//! - `role`: rank hierarchy, dashboard classification, navigation and actions
//! - `password`: Argon2id hashing and password policy
//! - `jwt`: signed session tokens
//! - `identity`: the authenticated officer seen by every request
//! - `audit`: the shared access-log writer
//! - `manager`: login, logout and per-request identity resolution

pub mod audit;
pub mod identity;
pub mod jwt;
pub mod manager;
pub mod password;
pub mod role;

pub use audit::AuditWriter;
pub use identity::AuthenticatedOfficer;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use manager::{AuthManager, LoginResult};
pub use password::{PasswordHasher, PasswordValidator};
pub use role::{Action, DashboardCategory, NavItem, classify, has_role, rank_level};
