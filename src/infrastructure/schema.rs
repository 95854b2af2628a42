use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

/// Create the tables on startup if they do not exist yet. The UNIQUE
/// constraint on `whatsapp_phone` is the authoritative duplicate guard; the
/// repository pre-check is only a fast path.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            whatsapp_phone TEXT NOT NULL UNIQUE,
            whatsapp_opt_in BOOLEAN NOT NULL,
            whatsapp_last_msg_id TEXT,
            registered_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS news (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            content TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS competitions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            date TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS schedule (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event TEXT NOT NULL UNIQUE,
            time TEXT NOT NULL
        )",
    ];

    for sql in statements {
        db.execute(Statement::from_string(db.get_database_backend(), sql))
            .await?;
    }
    Ok(())
}
