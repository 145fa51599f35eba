//! Student queries against PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::StudentStore;
use crate::{
    error::AppResult,
    models::{PageRequest, SortField, Student, StudentInput},
};

const COLUMNS: &str = "id, name, email, course, age";

/// Substring filters; every variant binds its pattern as `$1`
#[derive(Debug, Clone, Copy)]
enum Matching<'a> {
    Name(&'a str),
    Course(&'a str),
    Keyword(&'a str),
}

impl Matching<'_> {
    fn condition(&self) -> &'static str {
        match self {
            Matching::Name(_) => r"LOWER(name) LIKE $1 ESCAPE '\'",
            Matching::Course(_) => r"LOWER(course) LIKE $1 ESCAPE '\'",
            Matching::Keyword(_) => {
                r"(LOWER(name) LIKE $1 ESCAPE '\' OR LOWER(course) LIKE $1 ESCAPE '\')"
            }
        }
    }

    fn pattern(&self) -> String {
        match self {
            Matching::Name(q) | Matching::Course(q) | Matching::Keyword(q) => contains_pattern(q),
        }
    }
}

/// Build a `LIKE` pattern matching `needle` literally anywhere, case-folded
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `ORDER BY` clause; `id` breaks ties so page windows never overlap
fn order_clause(request: &PageRequest) -> String {
    match request.sort {
        Some(sort) if sort.field != SortField::Id => format!(
            "ORDER BY {} {}, id ASC",
            sort.field.column(),
            sort.direction.keyword()
        ),
        Some(sort) => format!("ORDER BY id {}", sort.direction.keyword()),
        None => "ORDER BY id ASC".to_string(),
    }
}

/// SELECT for one window; LIMIT and OFFSET are the two parameters after the filter's
fn select_page_sql(matching: Option<&Matching<'_>>, request: &PageRequest) -> String {
    let (where_clause, first) = match matching {
        Some(m) => (format!("WHERE {} ", m.condition()), 2),
        None => (String::new(), 1),
    };
    format!(
        "SELECT {} FROM students {}{} LIMIT ${} OFFSET ${}",
        COLUMNS,
        where_clause,
        order_clause(request),
        first,
        first + 1
    )
}

fn count_sql(matching: Option<&Matching<'_>>) -> String {
    match matching {
        Some(m) => format!("SELECT COUNT(*) FROM students WHERE {}", m.condition()),
        None => "SELECT COUNT(*) FROM students".to_string(),
    }
}

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        matching: Option<Matching<'_>>,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        let pattern = matching.as_ref().map(Matching::pattern);

        let count_query = count_sql(matching.as_ref());
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = pattern {
            count_builder = count_builder.bind(pattern);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = select_page_sql(matching.as_ref(), request);
        let mut builder = sqlx::query_as::<_, Student>(&select_query);
        if let Some(ref pattern) = pattern {
            builder = builder.bind(pattern);
        }
        let rows = builder
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }
}

#[async_trait]
impl StudentStore for StudentsRepository {
    async fn insert(&self, data: &StudentInput) -> AppResult<Student> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, email, course, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, course, age
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.course)
        .bind(data.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, course, age FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_page(&self, request: &PageRequest) -> AppResult<(Vec<Student>, i64)> {
        self.fetch_page(None, request).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, course, age FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        self.fetch_page(Some(Matching::Name(name)), request).await
    }

    async fn find_by_course_containing(
        &self,
        course: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        self.fetch_page(Some(Matching::Course(course)), request).await
    }

    async fn find_by_keyword(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        self.fetch_page(Some(Matching::Keyword(keyword)), request).await
    }

    async fn update(&self, id: i64, data: &StudentInput) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $2, email = $3, course = $4, age = $5
            WHERE id = $1
            RETURNING id, name, email, course, age
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.course)
        .bind(data.age)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
