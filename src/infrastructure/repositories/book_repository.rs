//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{BookFilter, BookRepository, BookWithAuthor, DomainError, NewBook, SortKey};
use crate::models::author::{self, Entity as AuthorEntity};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<BookWithAuthor>, DomainError> {
        let mut query = BookEntity::find().find_also_related(AuthorEntity);

        // SQLite LIKE is case-insensitive for ASCII, which is exactly the
        // substring semantics the search box promises.
        if let Some(q) = &filter.query
            && !q.is_empty()
        {
            let cond = Condition::any()
                .add(Column::Title.contains(q))
                .add(author::Column::Name.contains(q));
            query = query.filter(cond);
        }

        query = match filter.sort {
            SortKey::Title => query.order_by_asc(Column::Title),
            SortKey::Author => query.order_by_asc(author::Column::Name),
        };

        let rows = query.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(book, author)| to_domain(book, author))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookWithAuthor>, DomainError> {
        let row = BookEntity::find_by_id(id)
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(book, author)| to_domain(book, author)))
    }

    async fn create(&self, input: NewBook) -> Result<BookWithAuthor, DomainError> {
        // The form sends author_id as text, so check the reference before
        // inserting instead of relying on a constraint error.
        let author = AuthorEntity::find_by_id(input.author_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let book = ActiveModel {
            title: Set(input.title),
            isbn: Set(input.isbn),
            publication_year: Set(input.publication_year),
            author_id: Set(input.author_id),
            rating: Set(None),
            ..Default::default()
        };

        let result = book.insert(&self.db).await?;

        Ok(to_domain(result, Some(author)))
    }

    async fn set_rating(&self, id: i32, rating: i32) -> Result<BookWithAuthor, DomainError> {
        let book = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = book.into();
        active.rating = Set(Some(rating));
        active.update(&self.db).await?;

        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<BookWithAuthor, DomainError> {
        let deleted = self.find_by_id(id).await?.ok_or(DomainError::NotFound)?;

        BookEntity::delete_by_id(id).exec(&self.db).await?;

        Ok(deleted)
    }
}

fn to_domain(book: Model, author: Option<author::Model>) -> BookWithAuthor {
    BookWithAuthor {
        id: book.id,
        isbn: book.isbn,
        title: book.title,
        publication_year: book.publication_year,
        rating: book.rating,
        author_id: book.author_id,
        author_name: author.map(|a| a.name).unwrap_or_default(),
    }
}
