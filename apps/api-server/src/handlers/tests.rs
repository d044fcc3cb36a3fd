use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use blog_core::domain::{NewPost, Post, TITLE_MAX_LEN};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;
use blog_shared::{ApiResponse, PostView};

use crate::config::DEFAULT_CORS_ORIGIN;
use crate::middleware::cors::cors;
use crate::middleware::error::not_found;
use crate::state::AppState;

use super::configure_routes;

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .wrap(cors(&[DEFAULT_CORS_ORIGIN.to_string()]))
                .app_data(web::Data::new(AppState::with_repository($repo)))
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await
    };
    () => {
        test_app!(Arc::new(InMemoryPostRepository::new()))
    };
}

/// Gateway whose storage is unreachable.
struct OfflineRepository;

#[async_trait]
impl PostRepository for OfflineRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn get(&self, _id: i32) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn insert(&self, _post: NewPost) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn replace(&self, _post: Post) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _id: i32) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn list_recent(&self, _limit: u64) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

fn post_body(title: &str, content: &str) -> Value {
    json!({ "title": title, "content": content })
}

#[actix_web::test]
async fn test_health_is_independent_of_storage() {
    let app = test_app!(Arc::new(OfflineRepository));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_create_returns_201_with_location() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("Location header");
    assert!(location.ends_with("/api/v1/posts/1"), "got {location}");

    let body: ApiResponse<PostView> = test::read_body_json(resp).await;
    let view = body.into_data().unwrap();
    assert_eq!(view.id, 1);
    assert_eq!(view.title, "T");
    assert_eq!(view.modified_at, None);
}

#[actix_web::test]
async fn test_create_then_get() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/v1/posts/1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_success"], true);
    assert_eq!(body["data"]["title"], "T");
    assert_eq!(body["data"]["content"], "C");
    assert_eq!(body["data"]["modified_at"], Value::Null);
    assert_eq!(body["errors"], json!([]));
}

#[actix_web::test]
async fn test_get_missing_returns_404_envelope() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/v1/posts/5").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "is_success": false,
            "data": null,
            "message": "Blog post with ID 5 not found",
            "errors": []
        })
    );
}

#[actix_web::test]
async fn test_update_nonexistent_returns_404() {
    let app = test_app!();

    let req = test::TestRequest::put()
        .uri("/api/v1/posts/999")
        .set_json(post_body("T", "C"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiResponse<PostView> = test::read_body_json(resp).await;
    assert!(!body.is_success());
    assert_eq!(body.message(), Some("Blog post with ID 999 not found"));
}

#[actix_web::test]
async fn test_update_existing_sets_modified_at() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    let created: ApiResponse<PostView> = test::call_and_read_body_json(&app, req).await;
    let created = created.into_data().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/posts/{}", created.id))
        .set_json(post_body("T2", "C2"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<PostView> = test::read_body_json(resp).await;
    let updated = body.into_data().unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.content, "C2");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at.unwrap() >= updated.created_at);
}

#[actix_web::test]
async fn test_delete_then_delete_again() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/api/v1/posts/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], true);
    assert_eq!(body["message"], "Post deleted successfully");

    let req = test::TestRequest::delete().uri("/api/v1/posts/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_success"], false);
}

#[actix_web::test]
async fn test_list_and_recent() {
    let app = test_app!();

    for title in ["A", "B", "C"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(post_body(title, "body"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
    let all: ApiResponse<Vec<PostView>> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.data().map(Vec::len), Some(3));

    let req = test::TestRequest::get()
        .uri("/api/v1/posts/recent?count=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let recent: ApiResponse<Vec<PostView>> = test::read_body_json(resp).await;
    let titles: Vec<String> = recent
        .into_data()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["C", "B"]);
}

#[actix_web::test]
async fn test_storage_failure_on_list_and_create_is_400() {
    let app = test_app!(Arc::new(OfflineRepository));

    let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Error retrieving posts: Database connection failed: connection refused"
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(header::LOCATION).is_none());
}

#[actix_web::test]
async fn test_malformed_body_is_400_envelope() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(json!({ "title": "no content" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_success"], false);
    assert_eq!(body["message"], "Invalid request");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_non_numeric_id_is_400_envelope() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/v1/posts/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid request");
}

#[actix_web::test]
async fn test_unknown_route_is_404_envelope() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/v2/posts").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Resource not found");
}

#[actix_web::test]
async fn test_overlong_title_is_rejected() {
    let app = test_app!();
    let too_long = "x".repeat(TITLE_MAX_LEN as usize + 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body(&too_long, "C"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(header::LOCATION).is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        format!("Error creating post: Constraint violation: title exceeds {TITLE_MAX_LEN} characters")
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("T", "C"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/posts/1")
        .set_json(post_body(&too_long, "C2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/v1/posts/1").to_request();
    let stored: ApiResponse<PostView> = test::call_and_read_body_json(&app, req).await;
    let stored = stored.into_data().unwrap();
    assert_eq!(stored.title, "T");
    assert_eq!(stored.modified_at, None);
}

#[actix_web::test]
async fn test_cors_preflight_from_allowed_origin() {
    let app = test_app!();

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/v1/posts")
        .insert_header((header::ORIGIN, DEFAULT_CORS_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(DEFAULT_CORS_ORIGIN)
    );
}

#[actix_web::test]
async fn test_cors_headers_on_simple_request() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header((header::ORIGIN, DEFAULT_CORS_ORIGIN))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(DEFAULT_CORS_ORIGIN)
    );
}

#[actix_web::test]
async fn test_recent_with_zero_count_is_empty() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body("A", "a"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/posts/recent?count=0")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!([]));
}
