//! Resource (inventory item) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An inventory item (`resources`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Category (Vehicle, Firearm, Radio, ...).
    pub category: String,
    /// Units available for allocation. Never negative.
    pub quantity_available: i32,
    /// Free-text description.
    pub description: Option<String>,
    /// Path returned by the upload sink for an attached document or image.
    pub attachment_path: Option<String>,
    /// Administrator who added the item.
    pub created_by: String,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
    /// When the item last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to add an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
    /// Display name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Initial stock.
    pub quantity_available: i32,
    /// Description.
    pub description: Option<String>,
    /// Stored attachment path.
    pub attachment_path: Option<String>,
    /// Administrator adding the item.
    pub created_by: String,
}

impl NewResource {
    /// Materialize the row.
    pub fn into_resource(self, now: DateTime<Utc>) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            name: self.name,
            category: self.category,
            quantity_available: self.quantity_available,
            description: self.description,
            attachment_path: self.attachment_path,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Inventory listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceFilter {
    /// Only this category.
    pub category: Option<String>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
}

impl ResourceFilter {
    /// Evaluate the filter against one item.
    pub fn matches(&self, resource: &Resource) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| c == resource.category)
            && self.search.as_deref().is_none_or(|s| {
                resource.name.to_lowercase().contains(&s.to_lowercase())
            })
    }
}
