use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::errors::PortalError;
use crate::core::models::{ContentItem, User};
use crate::core::services::{ContentFields, ContentListQuery, ContentUpdate, UserListQuery};

// Request structs for JSON payloads. Fields default to empty strings so a
// missing field reaches the service's validation (400 with the endpoint's
// message) instead of a serde rejection.

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAdminPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ContentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub exam: String,
    #[serde(default)]
    pub url: String,
}

impl From<ContentRequest> for ContentFields {
    fn from(req: ContentRequest) -> Self {
        ContentFields {
            title: req.title,
            kind: req.kind,
            exam: req.exam,
            url: req.url,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct BulkContentRequest {
    #[serde(default)]
    pub content: Vec<ContentRequest>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub exam: Option<String>,
    pub url: Option<String>,
}

impl From<UpdateContentRequest> for ContentUpdate {
    fn from(req: UpdateContentRequest) -> Self {
        ContentUpdate {
            title: req.title,
            kind: req.kind,
            exam: req.exam,
            url: req.url,
        }
    }
}

// Query strings

#[derive(Deserialize, IntoParams)]
pub struct UsersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl From<UsersQuery> for UserListQuery {
    fn from(q: UsersQuery) -> Self {
        UserListQuery {
            page: q.page,
            limit: q.limit,
            search: q.search,
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct ProfileQuery {
    pub email: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ContentQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub exam: Option<String>,
}

impl From<ContentQuery> for ContentListQuery {
    fn from(q: ContentQuery) -> Self {
        ContentListQuery {
            page: q.page,
            limit: q.limit,
            search: q.search,
            sort_by: q.sort_by,
            sort_order: q.sort_order,
            kind: q.kind,
            exam: q.exam,
        }
    }
}

// Response structs

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// `{name, email}` pair returned on login; never includes the hash.
#[derive(Serialize, ToSchema)]
pub struct PublicUser {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
    pub total_pages: u32,
}

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: usize,
    pub active_exams: usize,
    pub content_uploads: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentListResponse {
    pub content: Vec<ContentItem>,
    pub total_pages: u32,
}

#[derive(Serialize, ToSchema)]
pub struct ContentResponse {
    pub message: String,
    pub content: ContentItem,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Newtype wrapper for PortalError to implement IntoResponse
pub struct ApiError(pub PortalError);

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            PortalError::Validation(_) | PortalError::InvalidContentType(_) => {
                StatusCode::BAD_REQUEST
            }
            PortalError::EmailTaken => StatusCode::CONFLICT,
            PortalError::InvalidCredentials
            | PortalError::IncorrectOldPassword
            | PortalError::IncorrectAdminPassword
            | PortalError::IncorrectCurrentPassword => StatusCode::UNAUTHORIZED,
            PortalError::UserNotFound | PortalError::ContentNotFound => StatusCode::NOT_FOUND,
            PortalError::Storage(_) | PortalError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail stays in the server log; the client gets the
        // generic message.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
