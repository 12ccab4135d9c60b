//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::{Author, AuthorRepository, DomainError, NewAuthor};
use crate::models::author::{ActiveModel, Entity as AuthorEntity, Model};
use crate::models::book::{Column as BookColumn, Entity as BookEntity};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find().all(&self.db).await?;

        Ok(authors.into_iter().map(to_domain).collect())
    }

    async fn create(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let author = ActiveModel {
            name: Set(input.name),
            birth_date: Set(input.birth_date),
            date_of_death: Set(input.date_of_death),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;

        Ok(to_domain(result))
    }

    async fn delete(&self, id: i32) -> Result<Author, DomainError> {
        let author = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        // Owned books go first, then the author, in one transaction.
        // A drop without commit rolls both deletes back.
        let txn = self.db.begin().await?;

        BookEntity::delete_many()
            .filter(BookColumn::AuthorId.eq(id))
            .exec(&txn)
            .await?;
        AuthorEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!(author_id = id, "deleted author and owned books");

        Ok(to_domain(author))
    }
}

fn to_domain(model: Model) -> Author {
    Author {
        id: model.id,
        name: model.name,
        birth_date: model.birth_date,
        date_of_death: model.date_of_death,
    }
}
