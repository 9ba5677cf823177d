pub mod auth;
pub mod community_photo;
pub mod detainee;
pub mod martyr;
pub mod media;
pub mod records;
pub mod shared;
pub mod story;
