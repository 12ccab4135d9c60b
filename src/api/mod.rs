pub mod error;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/add_author",
            get(pages::add_author_form).post(pages::add_author),
        )
        .route("/add_book", get(pages::add_book_form).post(pages::add_book))
        .route("/book/:id", get(pages::book_detail))
        .route("/book/:id/delete", post(pages::delete_book))
        .route("/book/:id/rate", post(pages::rate_book))
        .route("/author/:id/delete", post(pages::delete_author))
        .route("/suggest_book", get(pages::suggest_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
