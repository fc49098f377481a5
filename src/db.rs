use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;

use crate::err::DataError;

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Database {
    pub db: SqlitePool,
}

impl Database {
    /// open the database file under the given data directory, creating
    /// both as needed, and bring the schema up to date
    pub async fn build(data_dir: &Path) -> Result<Self, DataError> {
        // create the data directory if it doesn't exist
        std::fs::create_dir_all(data_dir)?;

        // append the database file name to the path
        let mut path = data_dir.to_path_buf();
        path.push("etheses.db");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            // SQLite leaves foreign keys off unless asked; the cascade and
            // restrict rules in the schema depend on this
            .foreign_keys(true);

        Self::connect(options).await
    }

    /// resolve the database location from the environment: DATABASE_URL
    /// wins, then ETHESES_DATA_DIR, then a local `data` directory
    pub async fn from_env() -> Result<Self, DataError> {
        dotenv::dotenv().ok();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            let options = SqliteConnectOptions::from_str(&url)?
                .create_if_missing(true)
                .foreign_keys(true);
            return Self::connect(options).await;
        }

        let data_dir = std::env::var("ETHESES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        Self::build(&data_dir).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self, DataError> {
        let pool = SqlitePool::connect_with(options).await?;

        // use the migration feature of sqlx to create the tables
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database schema is up to date");

        Ok(Database { db: pool })
    }
}
