//! Repository layer for database operations

pub mod students;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{PageRequest, Student, StudentInput},
};

/// Data access contract for student rows.
///
/// Paged lookups return the window together with the total match count.
/// Absence is reported as `None` / `false`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a row and return it with its assigned id
    async fn insert(&self, data: &StudentInput) -> AppResult<Student>;

    async fn find_all(&self) -> AppResult<Vec<Student>>;

    async fn find_page(&self, request: &PageRequest) -> AppResult<(Vec<Student>, i64)>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>>;

    /// Case-insensitive substring match on `name`
    async fn find_by_name_containing(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)>;

    /// Case-insensitive substring match on `course`
    async fn find_by_course_containing(
        &self,
        course: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)>;

    /// Case-insensitive substring match on `name` or `course`
    async fn find_by_keyword(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)>;

    /// Replace all mutable fields of row `id`; `None` when no such row exists
    async fn update(&self, id: i64, data: &StudentInput) -> AppResult<Option<Student>>;

    /// Remove row `id`; `false` when no such row exists
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Round-trip to the store
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct, one member per table
#[derive(Clone)]
pub struct Repository {
    pub students: students::StudentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            students: students::StudentsRepository::new(pool),
        }
    }
}
