//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::DomainError;
use super::input::{NewAuthor, NewBook};

/// Sort key for the book list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
}

/// Filter criteria for book queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    /// Case-insensitive substring matched against book title or author name
    pub query: Option<String>,
    pub sort: SortKey,
}

/// Author data for rendering
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Book joined with its owning author, for rendering
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BookWithAuthor {
    pub id: i32,
    pub isbn: Option<String>,
    pub title: String,
    pub publication_year: Option<i32>,
    pub rating: Option<i32>,
    pub author_id: i32,
    pub author_name: String,
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, input: NewAuthor) -> Result<Author, DomainError>;

    /// Delete an author and, in the same transaction, every book
    /// referencing it. Returns the deleted author.
    async fn delete(&self, id: i32) -> Result<Author, DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books matching the filter, with author names joined in
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<BookWithAuthor>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<BookWithAuthor>, DomainError>;

    /// Create a new book; fails with NotFound if the author does not exist
    async fn create(&self, input: NewBook) -> Result<BookWithAuthor, DomainError>;

    /// Set the rating of a book. Returns the updated book.
    async fn set_rating(&self, id: i32, rating: i32) -> Result<BookWithAuthor, DomainError>;

    /// Delete a book by ID. Returns the deleted book.
    async fn delete(&self, id: i32) -> Result<BookWithAuthor, DomainError>;
}
