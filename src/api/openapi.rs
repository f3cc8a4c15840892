use utoipa::OpenApi;

use crate::api::models::{
    AdminLoginRequest, BulkContentRequest, ChangeAdminPasswordRequest, ChangePasswordRequest,
    ContentListResponse, ContentRequest, ContentResponse, ErrorResponse, LoginRequest,
    LoginResponse, MessageResponse, ProfileResponse, PublicUser, RegisterRequest, StatsResponse,
    UpdateContentRequest, UpdateUserRequest, UserResponse, UserSummary, UsersResponse,
};
use crate::core::models::{ContentItem, ContentKind};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::list_users,
        super::handlers::get_profile,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::change_user_password,
        super::handlers::admin_login,
        super::handlers::change_admin_password,
        super::handlers::stats,
        super::handlers::list_content,
        super::handlers::get_content,
        super::handlers::create_content,
        super::handlers::create_content_bulk,
        super::handlers::update_content,
        super::handlers::delete_content
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        PublicUser,
        UpdateUserRequest,
        ChangePasswordRequest,
        AdminLoginRequest,
        ChangeAdminPasswordRequest,
        ContentRequest,
        BulkContentRequest,
        UpdateContentRequest,
        ContentItem,
        ContentKind,
        ContentListResponse,
        ContentResponse,
        UserSummary,
        UsersResponse,
        UserResponse,
        ProfileResponse,
        StatsResponse,
        MessageResponse,
        ErrorResponse
    )),
    info(
        title = "ExamHub API",
        description = "Exam-preparation portal: registration, login, admin user and content management"
    )
)]
pub struct ApiDoc;
