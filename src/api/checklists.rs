//! Checklist endpoints.
//!
//! Ids are checked locally before anything is sent: checklist ids must be
//! positive and user ids non-empty.

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{ChecklistItem, ChecklistSummary, CreateChecklistRequest, ReorderRequest};

fn require_checklist_id(checklist_id: i64) -> Result<(), ApiError> {
    if checklist_id <= 0 {
        return Err(ApiError::InvalidArgument(format!(
            "checklist id must be positive, got {}",
            checklist_id
        )));
    }
    Ok(())
}

/// List every checklist.
///
/// GET /checklists
pub async fn get_all_checklists<T: Transport>(
    client: &ApiClient<T>,
) -> Result<Vec<ChecklistSummary>, ApiError> {
    client.get_json("/checklists").await
}

/// Fetch the items of one checklist with per-user progress.
///
/// GET /checklists/{checklistId}
pub async fn get_checklist<T: Transport>(
    client: &ApiClient<T>,
    checklist_id: i64,
) -> Result<Vec<ChecklistItem>, ApiError> {
    require_checklist_id(checklist_id)?;
    client
        .get_json(&format!("/checklists/{}", checklist_id))
        .await
}

/// Flip the checked state of one item for one user.
///
/// POST /checklists/{checklistId}/item/{itemId}/user/{userId}/toggle
pub async fn toggle_item<T: Transport>(
    client: &ApiClient<T>,
    checklist_id: i64,
    item_id: i64,
    user_id: &str,
) -> Result<(), ApiError> {
    require_checklist_id(checklist_id)?;
    if user_id.is_empty() {
        return Err(ApiError::InvalidArgument("user id is required".to_string()));
    }
    let path = format!(
        "/checklists/{}/item/{}/user/{}/toggle",
        checklist_id,
        item_id,
        urlencoding::encode(user_id)
    );
    client.post_empty(&path).await
}

/// Create a checklist with the given items, in order.
///
/// POST /checklists. The name is trimmed and must not be blank.
pub async fn create_checklist<T: Transport>(
    client: &ApiClient<T>,
    name: &str,
    items: &[String],
) -> Result<ChecklistSummary, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidArgument(
            "checklist name is required".to_string(),
        ));
    }
    let request = CreateChecklistRequest {
        name: name.to_string(),
        items: items.to_vec(),
    };
    client.post_json("/checklists", &request).await
}

/// Set the display order of a checklist's items.
///
/// PUT /checklists/{checklistId}/reorder. `item_ids` must list every item
/// of the checklist; the backend rejects partial orderings.
pub async fn reorder_items<T: Transport>(
    client: &ApiClient<T>,
    checklist_id: i64,
    item_ids: &[i64],
) -> Result<(), ApiError> {
    require_checklist_id(checklist_id)?;
    let request = ReorderRequest {
        item_ids: item_ids.to_vec(),
    };
    client
        .put_json(&format!("/checklists/{}/reorder", checklist_id), &request)
        .await
}
