pub mod storage;
pub mod text;
