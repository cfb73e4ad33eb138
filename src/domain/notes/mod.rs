pub mod note;
pub mod sort;
