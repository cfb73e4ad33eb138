pub mod note_repository;
pub mod user_repository;
