use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    create_schema(&db).await?;

    Ok(db)
}

async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS author (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            birth_date TEXT,
            date_of_death TEXT
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Books are deleted explicitly inside the author-delete transaction,
    // the FOREIGN KEY clause documents the relationship.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            isbn TEXT,
            title TEXT NOT NULL,
            publication_year INTEGER,
            author_id INTEGER NOT NULL,
            rating INTEGER,
            FOREIGN KEY (author_id) REFERENCES author(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
