//! Pagination and sorting

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::student::Student;
use crate::error::{AppError, AppResult};

/// Column a page can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Age,
    Email,
    Course,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Age => "age",
            SortField::Email => "email",
            SortField::Course => "course",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; anything else is ascending
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Zero-indexed page window with optional ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: Option<Sort>, max_size: i64) -> AppResult<Self> {
        if page < 0 {
            return Err(AppError::BadRequest("page must not be negative".to_string()));
        }
        if size < 1 {
            return Err(AppError::BadRequest("size must be at least 1".to_string()));
        }
        if size > max_size {
            return Err(AppError::BadRequest(format!("size must not exceed {}", max_size)));
        }
        if page.checked_mul(size).is_none() {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }
        Ok(Self { page, size, sort })
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/// One window of a larger result set
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(StudentPage = Page<Student>)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records in this window
    pub items: Vec<T>,
    /// Total number of matching records
    pub total: i64,
    /// Current page number (0-based)
    pub page: i64,
    /// Requested page size
    pub size: i64,
    /// Number of pages needed to cover `total`
    pub total_pages: i64,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
            total_pages: (total + request.size - 1) / request.size,
        }
    }
}
