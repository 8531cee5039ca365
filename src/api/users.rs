//! User endpoints.

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{ApiRequest, Transport};
use super::types::User;

/// Check whether the stored credential is accepted by the backend.
///
/// GET /user/current. Any failure, including a 401, collapses to `false`.
/// A 401 still goes through the usual clear-and-notify interception.
pub async fn test_auth<T: Transport>(client: &ApiClient<T>) -> bool {
    match client.send(ApiRequest::get("/user/current")).await {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Auth check failed: {}", e);
            false
        }
    }
}

/// Fetch the signed-in user.
///
/// GET /user/current
pub async fn get_current_user<T: Transport>(client: &ApiClient<T>) -> Result<User, ApiError> {
    client.get_json("/user/current").await
}

/// Fetch every user known to the backend.
///
/// GET /user
pub async fn get_all_users<T: Transport>(client: &ApiClient<T>) -> Result<Vec<User>, ApiError> {
    client.get_json("/user").await
}
