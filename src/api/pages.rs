//! Page handlers: parse input, call the repositories, render a template
//! or redirect back to the list with a one-shot flash message.

use askama::Template;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::api::error::PageResult;
use crate::domain::input::{AuthorForm, BookForm, RatingForm, parse_rating};
use crate::domain::{Author, BookFilter, BookWithAuthor, DomainError, NewAuthor, NewBook, SortKey};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sort: SortKey,
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    books: Vec<BookWithAuthor>,
    search_query: String,
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "add_author.html")]
struct AddAuthorPage {
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "add_book.html")]
struct AddBookPage {
    authors: Vec<Author>,
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "book_detail.html")]
struct BookDetailPage {
    book: BookWithAuthor,
}

#[derive(Template)]
#[template(path = "suggest_book.html")]
struct SuggestBookPage {
    books: Vec<BookWithAuthor>,
}

/// GET / - filtered and sorted book list
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> PageResult<Html<String>> {
    let filter = BookFilter {
        query: if params.q.is_empty() {
            None
        } else {
            Some(params.q.clone())
        },
        sort: params.sort,
    };

    let books = state.book_repo.find_all(filter).await?;

    let page = HomePage {
        books,
        search_query: params.q,
        flash: params.flash,
    };
    Ok(Html(page.render()?))
}

/// GET /add_author - empty form
pub async fn add_author_form() -> PageResult<Html<String>> {
    let page = AddAuthorPage { flash: None };
    Ok(Html(page.render()?))
}

/// POST /add_author - create an author, re-render the form with a notification
pub async fn add_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> PageResult<Html<String>> {
    let input = NewAuthor::from_form(form)?;
    let author = state.author_repo.create(input).await?;

    tracing::info!(author_id = author.id, name = %author.name, "author created");

    let page = AddAuthorPage {
        flash: Some(format!("Author {} added successfully!", author.name)),
    };
    Ok(Html(page.render()?))
}

/// GET /add_book - form with all authors for selection
pub async fn add_book_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    let authors = state.author_repo.find_all().await?;

    let page = AddBookPage {
        authors,
        flash: None,
    };
    Ok(Html(page.render()?))
}

/// POST /add_book - create a book, re-render the form with a notification
pub async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> PageResult<Html<String>> {
    let input = NewBook::from_form(form)?;
    let book = state.book_repo.create(input).await?;

    tracing::info!(book_id = book.id, title = %book.title, "book created");

    let page = AddBookPage {
        authors: state.author_repo.find_all().await?,
        flash: Some(format!("Book {} added successfully!", book.title)),
    };
    Ok(Html(page.render()?))
}

/// GET /book/:id - detail page, 404 if absent
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    let book = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    let page = BookDetailPage { book };
    Ok(Html(page.render()?))
}

/// POST /book/:id/delete
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> PageResult<Redirect> {
    let book = state.book_repo.delete(id).await?;

    tracing::info!(book_id = id, title = %book.title, "book deleted");

    Ok(redirect_with_flash(&format!("Book '{}' deleted!", book.title)))
}

/// POST /book/:id/rate - set the rating if one was submitted
pub async fn rate_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<RatingForm>,
) -> PageResult<Redirect> {
    state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    match parse_rating(&form.rating)? {
        Some(rating) => {
            let book = state.book_repo.set_rating(id, rating).await?;
            Ok(redirect_with_flash(&format!(
                "Rating for '{}' updated to {}/10",
                book.title, rating
            )))
        }
        // Blank rating field leaves the book untouched
        None => Ok(Redirect::to("/")),
    }
}

/// POST /author/:id/delete - cascade delete
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> PageResult<Redirect> {
    let author = state.author_repo.delete(id).await?;

    tracing::info!(author_id = id, name = %author.name, "author deleted");

    Ok(redirect_with_flash(&format!(
        "Author '{}' and all their books deleted!",
        author.name
    )))
}

/// GET /suggest_book - placeholder page listing the whole catalog
pub async fn suggest_book(State(state): State<AppState>) -> PageResult<Html<String>> {
    let books = state.book_repo.find_all(BookFilter::default()).await?;

    let page = SuggestBookPage { books };
    Ok(Html(page.render()?))
}

/// Flash messages ride the redirect as a query parameter and are shown
/// exactly once by the target page.
fn redirect_with_flash(message: &str) -> Redirect {
    Redirect::to(&format!("/?flash={}", urlencoding::encode(message)))
}
