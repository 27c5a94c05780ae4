use tracing::info;

use super::core::Database;
use crate::TARGET_DB;

impl Database {
    pub(crate) async fn initialize_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool().acquire().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                link TEXT UNIQUE NOT NULL,
                source TEXT NOT NULL,
                category TEXT NOT NULL,
                published_date TEXT,
                fetched_date TEXT NOT NULL,
                location_name TEXT,
                location_lat REAL,
                location_lng REAL
            );
            CREATE INDEX IF NOT EXISTS idx_category ON articles (category);
            CREATE INDEX IF NOT EXISTS idx_source ON articles (source);
            CREATE INDEX IF NOT EXISTS idx_fetched ON articles (fetched_date);
            CREATE INDEX IF NOT EXISTS idx_location ON articles (location_name);
            "#,
        )
        .execute(&mut *conn)
        .await?;
        info!(target: TARGET_DB, "Tables ensured to exist");

        Ok(())
    }
}
