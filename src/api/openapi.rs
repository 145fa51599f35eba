//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Management REST API",
        version = "1.0.0",
        description = "REST API for managing student records with CRUD operations, pagination, sorting, and search.",
        contact(name = "Student API Support", email = "support@studentapi.com")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development Server")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Students
        students::create_student,
        students::list_students,
        students::list_students_paginated,
        students::search_by_name,
        students::search_by_course,
        students::search_by_keyword,
        students::get_student,
        students::update_student,
        students::delete_student,
    ),
    components(
        schemas(
            crate::models::student::Student,
            crate::models::student::StudentInput,
            crate::models::page::SortField,
            crate::models::page::StudentPage,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "students", description = "APIs for managing students")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
