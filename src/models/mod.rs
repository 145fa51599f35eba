//! Data models for the student API

pub mod page;
pub mod student;

// Re-export commonly used types
pub use page::{Page, PageRequest, Sort, SortDirection, SortField, StudentPage};
pub use student::{Student, StudentInput};
