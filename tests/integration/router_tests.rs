//! Router tests against an in-memory store

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use student_api::{
    api::create_router,
    config::AppConfig,
    models::{PageRequest, SortDirection, SortField, Student, StudentInput},
    repository::StudentStore,
    services::{students::StudentsService, Services},
    AppResult, AppState,
};

#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<Student>>,
    next_id: Mutex<i64>,
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn compare(a: &Student, b: &Student, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Course => a.course.cmp(&b.course),
    }
}

impl MemoryStore {
    fn window<F>(&self, request: &PageRequest, keep: F) -> (Vec<Student>, i64)
    where
        F: Fn(&Student) -> bool,
    {
        let mut rows: Vec<Student> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| keep(*s))
            .cloned()
            .collect();
        let sort = request.sort.unwrap_or_default();
        rows.sort_by(|a, b| {
            let ord = compare(a, b, sort.field);
            let ord = match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });
        let total = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        (items, total)
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert(&self, data: &StudentInput) -> AppResult<Student> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let student = data.apply_to(*next_id);
        self.rows.lock().unwrap().push(student.clone());
        Ok(student)
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_page(&self, request: &PageRequest) -> AppResult<(Vec<Student>, i64)> {
        Ok(self.window(request, |_| true))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        Ok(self.window(request, |s| contains(Some(s.name.as_str()), name)))
    }

    async fn find_by_course_containing(
        &self,
        course: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        Ok(self.window(request, |s| contains(s.course.as_deref(), course)))
    }

    async fn find_by_keyword(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> AppResult<(Vec<Student>, i64)> {
        Ok(self.window(request, |s| {
            contains(Some(s.name.as_str()), keyword) || contains(s.course.as_deref(), keyword)
        }))
    }

    async fn update(&self, id: i64, data: &StudentInput) -> AppResult<Option<Student>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|s| s.id == id).map(|row| {
            *row = data.apply_to(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

fn app() -> Router {
    let services = Services {
        students: StudentsService::new(Arc::new(MemoryStore::default())),
    };
    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

async fn create(app: &Router, name: &str, course: &str, age: i32) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/students",
        Some(json!({
            "name": name,
            "email": format!("{}@x.com", name.to_lowercase()),
            "course": course,
            "age": age
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("id")
}

fn names(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|s| s["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_crud_lifecycle() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "Alice", "email": "a@x.com", "course": "Math", "age": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("id");

    let (status, fetched) = send(&app, Method::GET, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/students/{}", id),
        Some(json!({"name": "Alicia", "email": "a@x.com", "course": "Math", "age": 21})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Alicia");
    assert_eq!(updated["age"], 21);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Student not found with id: {}", id));
}

#[tokio::test]
async fn test_ids_are_unique_and_client_id_ignored() {
    let app = app();
    let mut seen = HashSet::new();
    for i in 0..5 {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"id": 1, "name": format!("S{}", i), "email": "s@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(seen.insert(body["id"].as_i64().expect("id")));
    }

    let (status, all) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_invalid_payload_is_bad_request_with_field_details() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "  ", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["email"].is_array());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": null, "email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["email"].is_null());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/students/1",
        Some(json!({"name": "Bob", "email": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "Bob", "email": "b@x.com", "age": "old"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_and_invalid() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/students/999",
        Some(json!({"name": "Ghost", "email": "g@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = create(&app, "Carol", "Art", 30).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/students/{}", id),
        Some(json!({"name": "", "email": "c@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/api/students/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/students/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pages_cover_every_row_once() {
    let app = app();
    let mut created = HashSet::new();
    for i in 0..7 {
        created.insert(create(&app, &format!("Student{}", i), "Math", 18 + i).await);
    }

    let mut seen = HashSet::new();
    for page in 0..3 {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/students/paginated?page={}&size=3", page),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 7);
        assert_eq!(body["total_pages"], 3);
        let items = body["items"].as_array().expect("items");
        assert!(items.len() <= 3);
        for item in items {
            assert!(seen.insert(item["id"].as_i64().expect("id")));
        }
    }
    assert_eq!(seen, created);

    let (status, body) = send(&app, Method::GET, "/api/students/paginated?page=5&size=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["total"], 7);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["page"], 5);
}

#[tokio::test]
async fn test_sorting_and_direction_fallback() {
    let app = app();
    create(&app, "Bob", "Math", 22).await;
    create(&app, "Anna", "Physics", 19).await;
    create(&app, "Cleo", "Math", 25).await;

    let (_, body) = send(&app, Method::GET, "/api/students/paginated?sortBy=age&direction=DESC", None).await;
    assert_eq!(names(&body), vec!["Cleo", "Bob", "Anna"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/students/paginated?sortBy=name&direction=sideways",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Anna", "Bob", "Cleo"]);

    let (status, _) = send(&app, Method::GET, "/api/students/paginated?sortBy=password", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/students/paginated?page=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/students/paginated?size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_substring_searches() {
    let app = app();
    create(&app, "Anna", "Mathematics", 20).await;
    create(&app, "Hannah", "Biology", 21).await;
    create(&app, "Bob", "Applied Math", 22).await;

    let (status, body) = send(&app, Method::GET, "/api/students/search/name?name=ann", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Anna", "Hannah"]);

    let (_, body) = send(&app, Method::GET, "/api/students/search/course?course=MATH", None).await;
    assert_eq!(names(&body), vec!["Anna", "Bob"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/students/search?keyword=o&sortBy=name&direction=desc",
        None,
    )
    .await;
    assert_eq!(names(&body), vec!["Hannah", "Bob"]);

    let (_, body) = send(&app, Method::GET, "/api/students/search/name?name=", None).await;
    assert_eq!(body["total"], 3);

    let (status, _) = send(&app, Method::GET, "/api/students/search/name", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
