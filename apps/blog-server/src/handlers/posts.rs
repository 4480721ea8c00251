//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::PostForm;
use blog_core::domain::{Post, PostId};
use blog_shared::ApiResponse;
use blog_shared::dto::{PostListResponse, PostRequest, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(id: &PostId, post: Post) -> PostResponse {
    PostResponse {
        id: id.to_string(),
        author: post.author,
        title: post.title,
        content: post.content,
        likes: post.likes,
    }
}

fn post_form(req: PostRequest) -> PostForm {
    PostForm {
        author: req.author,
        title: req.title,
        content: req.content,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    let posts: Vec<PostResponse> = state
        .posts
        .list()
        .await
        .into_iter()
        .map(|(id, post)| post_response(&id, post))
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(PostListResponse {
        total: posts.len(),
        posts,
    }))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let (id, post) = state.posts.add(&post_form(body.into_inner())).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(&id, post))))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let post = state
        .posts
        .fetch(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&id, post))))
}

/// PUT /api/posts/{id}
///
/// The body is parsed by hand so an unknown id is reported as 404 even when
/// the body is also unreadable.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let req: PostRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            if state.posts.fetch(&id).await.is_none() {
                return Err(AppError::NotFound(format!("Post with id {} not found", id)));
            }
            return Err(AppError::BadRequest(format!("Json deserialize error: {}", e)));
        }
    };

    let post = state.posts.update(&id, &post_form(req)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&id, post))))
}

/// DELETE /api/posts/{id} - succeeds whether or not the post exists.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    state.posts.delete(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let post = state.posts.like(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&id, post))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use blog_infra::{InMemoryPostStore, JsonFilePostStore};
    use blog_shared::ErrorResponse;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::handlers::configure_routes;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::with_store(Arc::new(
                        InMemoryPostStore::new(),
                    ))))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! create {
        ($app:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json($body)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: ApiResponse<PostResponse> = test::read_body_json(resp).await;
            body.data.unwrap()
        }};
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = app!();
        let created = create!(app, json!({"author": " Ada ", "title": "Hello", "content": "Body"}));
        assert_eq!(created.author, "Ada");
        assert_eq!(created.likes, 0);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .to_request();
        let body: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.data.unwrap(), created);
    }

    #[actix_web::test]
    async fn test_create_applies_defaults() {
        let app = app!();
        let created = create!(app, json!({"content": "Body"}));
        assert_eq!(created.author, "Anonymous");
        assert_eq!(created.title, "Untitled");
    }

    #[actix_web::test]
    async fn test_create_rejects_empty_content() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"author": "Ada", "title": "Hello", "content": "  "}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.invalid_fields, vec!["content".to_string()]);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: ApiResponse<PostListResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.unwrap().total, 0);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ nope")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_unknown_is_not_found() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/posts/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_like_then_update_keeps_likes() {
        let app = app!();
        let created = create!(app, json!({"author": "Ada", "title": "Hello", "content": "Body"}));
        let like_uri = format!("/api/posts/{}/like", created.id);

        for _ in 0..2 {
            let req = test::TestRequest::post().uri(&like_uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .set_json(json!({"author": "Ada", "title": "Renamed", "content": "Body"}))
            .to_request();
        let body: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let updated = body.data.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.likes, 2);
    }

    #[actix_web::test]
    async fn test_update_and_like_unknown_are_not_found() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/api/posts/missing")
            .set_json(json!({"content": "Body"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::post()
            .uri("/api/posts/missing/like")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent() {
        let app = app!();
        let created = create!(app, json!({"author": "Ada", "title": "Hello", "content": "Body"}));
        let uri = format!("/api/posts/{}", created.id);

        for _ in 0..2 {
            let req = test::TestRequest::delete().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_health_reports_store_stats() {
        let app = app!();
        create!(app, json!({"content": "Body"}));

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"]["saves"], 1);
        assert_eq!(body["store"]["rejected_writes"], 0);
    }

    #[actix_web::test]
    async fn test_update_unknown_with_bad_body_is_not_found() {
        let app = app!();
        let req = test::TestRequest::put()
            .uri("/api/posts/missing")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ nope")
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_update_existing_with_bad_body_is_bad_request() {
        let app = app!();
        let created = create!(app, json!({"author": "Ada", "title": "Hello", "content": "Body"}));
        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header(("content-type", "application/json"))
            .set_payload("{ nope")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.status, 400);
    }

    #[actix_web::test]
    async fn test_health_is_degraded_after_corrupt_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{ not json").unwrap();
        let state = AppState::with_store(Arc::new(JsonFilePostStore::new(&path)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: ApiResponse<PostListResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.unwrap().total, 0);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["store"]["load_failures"], 1);
    }
}
