use common::storage::ObjectKey;
use common::text::LocalizedText;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::{STATUS_APPROVED, STATUS_PENDING};
use crate::error::AppError;

/// Default page size for public list endpoints and the unified feed.
pub const DEFAULT_PAGE_SIZE: u64 = 24;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 24)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 2)]
    pub total_pages: u64,
}

/// Query parameters for public list endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Defaults to 24.
    pub per_page: Option<u64>,
}

impl ListQuery {
    pub fn resolve(&self) -> (u64, u64) {
        let page = Ord::max(self.page.unwrap_or(1), 1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        (page, per_page)
    }
}

/// Query parameters for admin moderation-queue listings.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AdminListQuery {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Defaults to 24.
    pub per_page: Option<u64>,
    /// Filter by moderation status ("pending" or "approved"). Omit for all.
    pub status: Option<String>,
}

impl AdminListQuery {
    pub fn resolve(&self) -> (u64, u64) {
        let page = Ord::max(self.page.unwrap_or(1), 1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        (page, per_page)
    }

    pub fn status_filter(&self) -> Result<Option<&str>, AppError> {
        match self.status.as_deref() {
            None => Ok(None),
            Some(s @ (STATUS_PENDING | STATUS_APPROVED)) => Ok(Some(s)),
            Some(_) => Err(AppError::Validation(
                "status must be one of: pending, approved".into(),
            )),
        }
    }
}

/// Row offset for a 1-based page. Saturates so an absurd page number walks
/// off the end of the data instead of wrapping around.
pub fn page_offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a required bilingual pair: at least one side must be non-blank.
/// The blank side is filled from the other.
pub fn required_pair(
    field: &str,
    ar: Option<&str>,
    en: Option<&str>,
) -> Result<LocalizedText, AppError> {
    LocalizedText::from_parts(ar, en)
        .ok_or_else(|| AppError::Validation(format!("{field}_ar or {field}_en is required")))
}

/// Validate a trimmed text field against a maximum character count.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Minimal shape check for submitter emails. Full deliverability checks are
/// out of scope; this rejects obvious garbage.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let well_formed = email.len() <= 254
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(AppError::Validation("email is not a valid address".into()));
    }
    Ok(())
}

/// Validate that an image key is well formed and points into the expected
/// storage folder.
pub fn validate_image_key(key: &str, folder: &str) -> Result<(), AppError> {
    let parsed = ObjectKey::parse(key)
        .map_err(|_| AppError::Validation(format!("image_key '{key}' is not a valid key")))?;
    if parsed.folder() != folder {
        return Err(AppError::Validation(format!(
            "image_key must be in the '{folder}' folder"
        )));
    }
    Ok(())
}
