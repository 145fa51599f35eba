//! Student service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Page, PageRequest, Student, StudentInput},
    repository::StudentStore,
};

#[derive(Clone)]
pub struct StudentsService {
    store: Arc<dyn StudentStore>,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Student not found with id: {}", id))
}

impl StudentsService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, data: &StudentInput) -> AppResult<Student> {
        let student = self.store.insert(data).await?;
        tracing::info!(student_id = student.id, "Student created");
        Ok(student)
    }

    pub async fn list(&self) -> AppResult<Vec<Student>> {
        self.store.find_all().await
    }

    pub async fn list_paginated(&self, request: &PageRequest) -> AppResult<Page<Student>> {
        let (students, total) = self.store.find_page(request).await?;
        Ok(Page::new(students, total, request))
    }

    pub async fn search_by_name(&self, name: &str, request: &PageRequest) -> AppResult<Page<Student>> {
        let (students, total) = self.store.find_by_name_containing(name, request).await?;
        Ok(Page::new(students, total, request))
    }

    pub async fn search_by_course(&self, course: &str, request: &PageRequest) -> AppResult<Page<Student>> {
        let (students, total) = self.store.find_by_course_containing(course, request).await?;
        Ok(Page::new(students, total, request))
    }

    /// Match `keyword` against name or course
    pub async fn search_by_keyword(&self, keyword: &str, request: &PageRequest) -> AppResult<Page<Student>> {
        let (students, total) = self.store.find_by_keyword(keyword, request).await?;
        Ok(Page::new(students, total, request))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Student> {
        self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Replace name, email, course and age of an existing student.
    ///
    /// The existence check and the write are one statement, so a concurrent
    /// delete yields `NotFound` rather than a write to a vanished row.
    pub async fn update(&self, id: i64, data: &StudentInput) -> AppResult<Student> {
        let student = self.store.update(id, data).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(student_id = id, "Student updated");
        Ok(student)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }

    /// Check that the store answers
    pub async fn readiness(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
