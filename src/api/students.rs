//! Student endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    config::PaginationConfig,
    error::{AppResult, ErrorResponse},
    models::{
        page::StudentPage, PageRequest, Sort, SortDirection, SortField, Student, StudentInput,
    },
    AppState,
};

use super::{ApiPath, ApiQuery, ValidJson};

/// Paging and sorting parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (0-based, default 0)
    pub page: Option<i64>,
    /// Items per page (default 10)
    pub size: Option<i64>,
    /// Sort field (id, name, age, email, course)
    pub sort_by: Option<SortField>,
    /// Sort direction (asc/desc); anything but `desc` sorts ascending
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearchQuery {
    /// Name to search
    pub name: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseSearchQuery {
    /// Course to search
    pub course: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct KeywordSearchQuery {
    /// Keyword to search in name or course
    pub keyword: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<SortField>,
    pub direction: Option<String>,
}

fn sort_of(sort_by: Option<SortField>, direction: Option<&str>) -> Sort {
    Sort {
        field: sort_by.unwrap_or_default(),
        direction: direction.map(SortDirection::from_param).unwrap_or_default(),
    }
}

fn page_request(
    pagination: &PaginationConfig,
    page: Option<i64>,
    size: Option<i64>,
    sort: Option<Sort>,
) -> AppResult<PageRequest> {
    PageRequest::new(
        page.unwrap_or(0),
        size.unwrap_or(pagination.default_size),
        sort,
        pagination.max_size,
    )
}

/// Create a new student
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "students",
    request_body = StudentInput,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidJson(data): ValidJson<StudentInput>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let student = state.services.students.create(&data).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Get all students (no pagination)
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    responses(
        (status = 200, description = "Successfully retrieved all students", body = Vec<Student>)
    )
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<Student>>> {
    let students = state.services.students.list().await?;
    Ok(Json(students))
}

/// Get students with pagination and sorting
#[utoipa::path(
    get,
    path = "/api/students/paginated",
    tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "Successfully retrieved paginated students", body = StudentPage),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse)
    )
)]
pub async fn list_students_paginated(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> AppResult<Json<StudentPage>> {
    let sort = sort_of(query.sort_by, query.direction.as_deref());
    let request = page_request(&state.config.pagination, query.page, query.size, Some(sort))?;
    let page = state.services.students.list_paginated(&request).await?;
    Ok(Json(page))
}

/// Search students by name
#[utoipa::path(
    get,
    path = "/api/students/search/name",
    tag = "students",
    params(NameSearchQuery),
    responses(
        (status = 200, description = "Successfully retrieved matching students", body = StudentPage)
    )
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NameSearchQuery>,
) -> AppResult<Json<StudentPage>> {
    let request = page_request(&state.config.pagination, query.page, query.size, None)?;
    let page = state.services.students.search_by_name(&query.name, &request).await?;
    Ok(Json(page))
}

/// Search students by course
#[utoipa::path(
    get,
    path = "/api/students/search/course",
    tag = "students",
    params(CourseSearchQuery),
    responses(
        (status = 200, description = "Successfully retrieved matching students", body = StudentPage)
    )
)]
pub async fn search_by_course(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CourseSearchQuery>,
) -> AppResult<Json<StudentPage>> {
    let request = page_request(&state.config.pagination, query.page, query.size, None)?;
    let page = state.services.students.search_by_course(&query.course, &request).await?;
    Ok(Json(page))
}

/// Search students by keyword (name or course)
#[utoipa::path(
    get,
    path = "/api/students/search",
    tag = "students",
    params(KeywordSearchQuery),
    responses(
        (status = 200, description = "Successfully retrieved matching students", body = StudentPage)
    )
)]
pub async fn search_by_keyword(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KeywordSearchQuery>,
) -> AppResult<Json<StudentPage>> {
    let sort = sort_of(query.sort_by, query.direction.as_deref());
    let request = page_request(&state.config.pagination, query.page, query.size, Some(sort))?;
    let page = state
        .services
        .students
        .search_by_keyword(&query.keyword, &request)
        .await?;
    Ok(Json(page))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Student>> {
    let student = state.services.students.get_by_id(id).await?;
    Ok(Json(student))
}

/// Update student
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidJson(data): ValidJson<StudentInput>,
) -> AppResult<Json<Student>> {
    let student = state.services.students.update(id, &data).await?;
    Ok(Json(student))
}

/// Delete student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted successfully"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
