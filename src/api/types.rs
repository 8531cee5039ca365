//! Request and response types for the checklist backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Checklist entry from GET /checklists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub id: i64,
    pub name: String,
}

/// One item from GET /checklists/{id} with per-user progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: i64,
    pub content: String,
    /// Username -> whether that user has checked the item.
    #[serde(default)]
    pub progress: HashMap<String, bool>,
}

impl ChecklistItem {
    /// Whether `username` has checked this item. Unknown users count as unchecked.
    pub fn is_checked_by(&self, username: &str) -> bool {
        self.progress.get(username).copied().unwrap_or(false)
    }
}

/// User record from GET /user and GET /user/current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque id (a UUID string on the backend).
    pub id: String,
    pub username: String,
}

/// Body sent to POST /checklists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistRequest {
    pub name: String,
    pub items: Vec<String>,
}

/// Body sent to PUT /checklists/{id}/reorder.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub item_ids: Vec<i64>,
}
