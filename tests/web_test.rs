use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use librarium::infrastructure::AppState;
use librarium::{api, db};

async fn setup_app() -> Router {
    let conn = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::router(AppState::new(conn))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn end_to_end_catalog_flow() {
    let app = setup_app().await;

    // Add an author
    let response = app
        .clone()
        .oneshot(form_post(
            "/add_author",
            "name=Jane+Austen&birth_date=16-12-1775&date_of_death=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Author Jane Austen added successfully!"));

    // The author shows up in the add-book form
    let response = app.clone().oneshot(get("/add_book")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Jane Austen"));

    // Add a book for her
    let response = app
        .clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=111&publication_year=1815&author_id=1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Book Emma added successfully!"));

    // The list, sorted by title, shows the book with the author joined in
    let response = app.clone().oneshot(get("/?sort=title")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Emma"));
    assert!(body.contains("Jane Austen"));

    // Rate the book; the redirect carries a one-shot flash message
    let response = app
        .clone()
        .oneshot(form_post("/book/1/rate", "rating=9"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/?flash="));

    // The detail page shows the new rating
    let response = app.clone().oneshot(get("/book/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("9/10"));

    // Delete the author; the cascade removes the book too
    let response = app
        .clone()
        .oneshot(form_post("/author/1/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("Emma"));
    assert!(!body.contains("Jane Austen"));
}

#[tokio::test]
async fn flash_parameter_is_rendered_on_the_list_page() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/?flash=Book%20%27Emma%27%20deleted%21"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("deleted!"));
}

#[tokio::test]
async fn missing_book_detail_is_404() {
    let app = setup_app().await;

    let response = app.clone().oneshot(get("/book/99999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_book_is_404() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/book/99999/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_author_date_is_400() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(form_post(
            "/add_author",
            "name=Jane+Austen&birth_date=1775-12-16",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adding_book_for_unknown_author_is_404() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=&publication_year=&author_id=42",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_rating_leaves_book_untouched() {
    let app = setup_app().await;

    app.clone()
        .oneshot(form_post("/add_author", "name=Jane+Austen"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=&publication_year=&author_id=1",
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/book/1/rate", "rating="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(get("/book/1")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("unrated"));
}

#[tokio::test]
async fn out_of_range_rating_is_400() {
    let app = setup_app().await;

    app.clone()
        .oneshot(form_post("/add_author", "name=Jane+Austen"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=&publication_year=&author_id=1",
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/book/1/rate", "rating=11"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_filters_the_list() {
    let app = setup_app().await;

    app.clone()
        .oneshot(form_post("/add_author", "name=J.R.R.+Tolkien"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post("/add_author", "name=Jane+Austen"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post(
            "/add_book",
            "title=The+Hobbit&isbn=&publication_year=&author_id=1",
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=&publication_year=&author_id=2",
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/?q=tolk")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("The Hobbit"));
    assert!(!body.contains("Emma"));
}

#[tokio::test]
async fn suggest_book_lists_the_catalog() {
    let app = setup_app().await;

    app.clone()
        .oneshot(form_post("/add_author", "name=Jane+Austen"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post(
            "/add_book",
            "title=Emma&isbn=&publication_year=&author_id=1",
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/suggest_book")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Emma"));
}
