//! Officer domain entities.

pub mod model;
pub mod rank;

pub use model::{NewOfficer, Officer, OfficerFilter, OfficerUpdate};
pub use rank::Rank;

/// Well-known designation labels. Designation is free text in storage;
/// only these values carry meaning for role classification.
pub mod designation {
    /// Criminal Investigation Department.
    pub const CID: &str = "CID";
    /// Traffic division.
    pub const TRAFFIC: &str = "Traffic";
    /// Non-commissioned officer.
    pub const NCO: &str = "NCO";
    /// Administrative staff.
    pub const ADMIN: &str = "Admin";
}
