pub mod community_photo;
pub mod detainee;
pub mod martyr;
pub mod role;
pub mod role_permission;
pub mod story;
pub mod user;

/// Moderation lifecycle states. There is no "rejected" state: rejection is
/// modeled as physical row deletion.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
