use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::shared::validate_email;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Display name (1-64 characters).
    #[schema(example = "Amal Haddad")]
    pub name: String,
    /// Unique email address.
    #[schema(example = "amal@example.org")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::Validation("name must be 1-64 characters".into()));
    }
    validate_email(&payload.email)?;
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Email of the account to log into.
    #[schema(example = "amal@example.org")]
    pub email: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// ID of the newly created user.
    pub id: Uuid,
    /// Display name of the newly created user.
    #[schema(example = "Amal Haddad")]
    pub name: String,
    /// Email of the newly created user.
    #[schema(example = "amal@example.org")]
    pub email: String,
}

impl From<crate::entity::user::Model> for RegisterResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Authenticated user's display name.
    #[schema(example = "Amal Haddad")]
    pub name: String,
    /// Authenticated user's email.
    #[schema(example = "amal@example.org")]
    pub email: String,
    /// User's effective role.
    #[schema(example = "contributor")]
    pub role: String,
    /// Permissions granted to the user.
    #[schema(example = json!(["story:approve", "photo:approve"]))]
    pub permissions: Vec<String>,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    #[schema(example = "Amal Haddad")]
    pub name: String,
    /// Email.
    #[schema(example = "amal@example.org")]
    pub email: String,
    /// Effective role.
    #[schema(example = "contributor")]
    pub role: String,
    /// Permissions.
    #[schema(example = json!(["story:approve", "photo:approve"]))]
    pub permissions: Vec<String>,
}

/// Request body for assigning a role to a user.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AssignRoleRequest {
    /// One of the seeded role names.
    #[schema(example = "contributor")]
    pub role: String,
}

/// A user row as seen by administrators.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
