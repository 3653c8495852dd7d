use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        "PRAGMA foreign_keys = ON",
        // Editions are keyed by ISBN
        r#"
        CREATE TABLE IF NOT EXISTS book_editions (
            isbn TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            author_name TEXT NOT NULL,
            number INTEGER
        )
        "#,
        // Printing batches; (batch_number, edition_isbn) is the natural key
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            publisher TEXT NOT NULL,
            published_year INTEGER,
            batch_number TEXT NOT NULL,
            edition_isbn TEXT NOT NULL,
            UNIQUE (batch_number, edition_isbn),
            FOREIGN KEY (edition_isbn) REFERENCES book_editions(isbn)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS defect_editions (
            defect_code TEXT PRIMARY KEY NOT NULL,
            edition_isbn TEXT NOT NULL,
            UNIQUE (defect_code, edition_isbn),
            FOREIGN KEY (edition_isbn) REFERENCES book_editions(isbn)
        )
        "#,
        // One row per entry of a defect's affected batch list, in list order
        r#"
        CREATE TABLE IF NOT EXISTS affected_batches (
            defect_code TEXT NOT NULL,
            position INTEGER NOT NULL,
            batch_number TEXT NOT NULL,
            edition_isbn TEXT NOT NULL,
            PRIMARY KEY (defect_code, position),
            FOREIGN KEY (defect_code) REFERENCES defect_editions(defect_code),
            FOREIGN KEY (batch_number, edition_isbn) REFERENCES books(batch_number, edition_isbn)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_books_edition_isbn ON books(edition_isbn)",
        "CREATE INDEX IF NOT EXISTS idx_affected_batches_batch ON affected_batches(batch_number, edition_isbn)",
    ];

    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await?;
    }

    tracing::debug!("Database schema is up to date");
    Ok(())
}
