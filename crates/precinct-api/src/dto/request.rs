//! Request DTOs with validation.
//!
//! Text fields default to empty so an absent field reaches validation and
//! is reported by name instead of failing deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use precinct_entity::case::{AssignmentRole, CaseStatus};
use precinct_entity::complaint::ComplaintStatus;
use precinct_entity::officer::{OfficerUpdate, Rank};
use precinct_entity::resource::Urgency;
use precinct_service::case::{
    AssignOfficerRequest, CaseFromComplaintRequest, CreateCaseRequest, FileComplaintRequest,
    OpenInvestigationRequest,
};
use precinct_service::duty::ScheduleDutyRequest;
use precinct_service::resource::CreateResourceRequest;
use precinct_service::user::CreateOfficerRequest;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Badge id.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: officer_id"))]
    pub officer_id: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: password"))]
    pub password: String,
}

/// Own password change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: current_password"))]
    pub current_password: String,
    /// New password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: new_password"))]
    pub new_password: String,
}

/// Admin password reset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// New password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: new_password"))]
    pub new_password: String,
}

/// Create officer request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOfficerBody {
    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "Missing required field: officer_id"))]
    pub officer_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Missing required field: name"))]
    pub name: String,
    pub gender: Option<String>,
    pub rank: Rank,
    pub designation: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: password"))]
    pub password: String,
}

impl From<CreateOfficerBody> for CreateOfficerRequest {
    fn from(body: CreateOfficerBody) -> Self {
        Self {
            officer_id: body.officer_id,
            name: body.name,
            gender: body.gender,
            rank: body.rank,
            designation: body.designation,
            email: body.email,
            phone: body.phone,
            password: body.password,
        }
    }
}

/// Profile update. Rank and designation are honoured for admins only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOfficerBody {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub gender: Option<String>,
    pub rank: Option<Rank>,
    pub designation: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<UpdateOfficerBody> for OfficerUpdate {
    fn from(body: UpdateOfficerBody) -> Self {
        Self {
            name: body.name,
            gender: body.gender,
            rank: body.rank,
            designation: body.designation,
            email: body.email,
            phone: body.phone,
        }
    }
}

/// Complaint intake.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileComplaintBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: complainant_name"))]
    pub complainant_name: String,
    pub complainant_contact: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: complaint_type"))]
    pub complaint_type: String,
    pub location: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: description"))]
    pub description: String,
}

impl From<FileComplaintBody> for FileComplaintRequest {
    fn from(body: FileComplaintBody) -> Self {
        Self {
            complainant_name: body.complainant_name,
            complainant_contact: body.complainant_contact,
            complaint_type: body.complaint_type,
            location: body.location,
            description: body.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintStatusBody {
    pub status: ComplaintStatus,
}

/// Promote a complaint to a case. Title and type default from the complaint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CaseFromComplaintBody {
    pub title: Option<String>,
    pub case_type: Option<String>,
    pub description: Option<String>,
    /// Lead investigator.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: officer_id"))]
    pub officer_id: String,
}

impl From<CaseFromComplaintBody> for CaseFromComplaintRequest {
    fn from(body: CaseFromComplaintBody) -> Self {
        Self {
            title: body.title,
            case_type: body.case_type,
            description: body.description,
            officer_id: body.officer_id,
        }
    }
}

/// Direct case creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCaseBody {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Missing required field: title"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: case_type"))]
    pub case_type: String,
    /// Lead investigator.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: officer_id"))]
    pub officer_id: String,
}

impl From<CreateCaseBody> for CreateCaseRequest {
    fn from(body: CreateCaseBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            case_type: body.case_type,
            officer_id: body.officer_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStatusBody {
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignOfficerBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: officer_id"))]
    pub officer_id: String,
    #[serde(default = "default_assignment_role")]
    pub role: AssignmentRole,
}

fn default_assignment_role() -> AssignmentRole {
    AssignmentRole::SupportingOfficer
}

impl From<AssignOfficerBody> for AssignOfficerRequest {
    fn from(body: AssignOfficerBody) -> Self {
        Self {
            officer_id: body.officer_id,
            role: body.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OpenInvestigationBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: lead_officer_id"))]
    pub lead_officer_id: String,
    pub due_date: Option<NaiveDate>,
}

impl From<OpenInvestigationBody> for OpenInvestigationRequest {
    fn from(body: OpenInvestigationBody) -> Self {
        Self {
            lead_officer_id: body.lead_officer_id,
            due_date: body.due_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteInvestigationBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: findings"))]
    pub findings: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStockBody {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

/// Allocation request against the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResourceRequestBody {
    pub resource_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: reason"))]
    pub reason: String,
    #[serde(default)]
    pub urgency: Urgency,
}

impl From<CreateResourceRequestBody> for CreateResourceRequest {
    fn from(body: CreateResourceRequestBody) -> Self {
        Self {
            resource_id: body.resource_id,
            quantity: body.quantity,
            reason: body.reason,
            urgency: body.urgency,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduleDutyBody {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: officer_id"))]
    pub officer_id: String,
    pub duty_date: NaiveDate,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: shift"))]
    pub shift: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing required field: location"))]
    pub location: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
}

impl From<ScheduleDutyBody> for ScheduleDutyRequest {
    fn from(body: ScheduleDutyBody) -> Self {
        Self {
            officer_id: body.officer_id,
            duty_date: body.duty_date,
            shift: body.shift,
            location: body.location,
            notes: body.notes,
            resource_ids: body.resource_ids,
        }
    }
}
