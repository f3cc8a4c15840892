use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::models::*;
use crate::core::errors::PortalError;
use crate::core::services::PortalService;
use crate::infrastructure::storage::json_file::JsonFileStorage;

type Service = Arc<PortalService<JsonFileStorage>>;

// Define API routes
pub fn api_routes(service: Service) -> Router {
    Router::new()
        .route("/register", axum::routing::post(register))
        .route("/login", axum::routing::post(login))
        .route("/users", axum::routing::get(list_users))
        .route(
            "/users/{user_id}",
            axum::routing::put(update_user).delete(delete_user),
        )
        .route("/user", axum::routing::get(get_profile))
        .route(
            "/user/change-password",
            axum::routing::put(change_user_password),
        )
        .route("/admin-login", axum::routing::post(admin_login))
        .route(
            "/admin/change-password",
            axum::routing::put(change_admin_password),
        )
        .route("/stats", axum::routing::get(stats))
        .route(
            "/content",
            axum::routing::get(list_content).post(create_content),
        )
        .route("/content/bulk", axum::routing::post(create_content_bulk))
        .route(
            "/content/{content_id}",
            axum::routing::get(get_content)
                .put(update_content)
                .delete(delete_content),
        )
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<Service>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    service
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully!")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = service.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        user: PublicUser {
            name: user.name,
            email: user.email,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UsersQuery),
    responses(
        (status = 200, description = "Paged user list", body = UsersResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(service): State<Service>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let page = service.list_users(query.into()).await?;
    Ok(Json(UsersResponse {
        users: page.users.into_iter().map(UserSummary::from).collect(),
        total_pages: page.total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/user",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Profile data", body = ProfileResponse),
        (status = 400, description = "Missing email parameter", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(service): State<Service>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| PortalError::missing("Email query parameter is required."))?;
    let user = service.get_user_by_email(&email).await?;
    Ok(Json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already taken", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(service): State<Service>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service.update_user(user_id, &req.name, &req.email).await?;
    Ok(Json(UserResponse {
        message: "User updated successfully!".to_string(),
        user: user.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(service): State<Service>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully!")))
}

#[utoipa::path(
    put,
    path = "/api/user/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Incorrect old password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn change_user_password(
    State(service): State<Service>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service
        .change_user_password(&req.email, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully!")))
}

#[utoipa::path(
    post,
    path = "/api/admin-login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin login successful", body = MessageResponse),
        (status = 400, description = "Missing password", body = ErrorResponse),
        (status = 401, description = "Incorrect admin password", body = ErrorResponse)
    )
)]
pub async fn admin_login(
    State(service): State<Service>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.admin_login(&req.password).await?;
    Ok(Json(MessageResponse::new("Admin login successful!")))
}

#[utoipa::path(
    put,
    path = "/api/admin/change-password",
    request_body = ChangeAdminPasswordRequest,
    responses(
        (status = 200, description = "Admin password changed", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Incorrect current password", body = ErrorResponse)
    )
)]
pub async fn change_admin_password(
    State(service): State<Service>,
    Json(req): Json<ChangeAdminPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service
        .change_admin_password(&req.current_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new(
        "Admin password changed successfully!",
    )))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn stats(State(service): State<Service>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = service.stats().await?;
    Ok(Json(StatsResponse {
        total_users: stats.total_users,
        active_exams: stats.active_exams,
        content_uploads: stats.content_uploads,
    }))
}

#[utoipa::path(
    get,
    path = "/api/content",
    params(ContentQuery),
    responses(
        (status = 200, description = "Paged content list", body = ContentListResponse),
        (status = 400, description = "Invalid type filter", body = ErrorResponse)
    )
)]
pub async fn list_content(
    State(service): State<Service>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ContentListResponse>, ApiError> {
    let page = service.list_content(query.into()).await?;
    Ok(Json(ContentListResponse {
        content: page.content,
        total_pages: page.total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/content/{content_id}",
    responses(
        (status = 200, description = "Content item", body = crate::core::models::ContentItem),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
pub async fn get_content(
    State(service): State<Service>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<crate::core::models::ContentItem>, ApiError> {
    let item = service.get_content(content_id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/content",
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Content added", body = ContentResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_content(
    State(service): State<Service>,
    Json(req): Json<ContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let item = service.add_content(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContentResponse {
            message: "Content added successfully!".to_string(),
            content: item,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/content/bulk",
    request_body = BulkContentRequest,
    responses(
        (status = 201, description = "Batch inserted", body = MessageResponse),
        (status = 400, description = "Empty or malformed batch", body = ErrorResponse)
    )
)]
pub async fn create_content_bulk(
    State(service): State<Service>,
    Json(req): Json<BulkContentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let fields = req.content.into_iter().map(Into::into).collect();
    let count = service.add_content_bulk(fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(&format!(
            "Successfully added {count} content items."
        ))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/content/{content_id}",
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
pub async fn update_content(
    State(service): State<Service>,
    Path(content_id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    let item = service.update_content(content_id, req.into()).await?;
    Ok(Json(ContentResponse {
        message: "Content updated successfully!".to_string(),
        content: item,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/content/{content_id}",
    responses(
        (status = 200, description = "Content deleted", body = MessageResponse),
        (status = 404, description = "Content not found", body = ErrorResponse)
    )
)]
pub async fn delete_content(
    State(service): State<Service>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_content(content_id).await?;
    Ok(Json(MessageResponse::new("Content deleted successfully!")))
}
