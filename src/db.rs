use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::env;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool.
/// Acquired once per process at startup and injected into the service
/// layer; the analytics core never touches the pool directly.
pub struct AppState {
  pub db: DbPool,
}

const DB_URL_ENV: &str = "FITSTREAK_DATABASE_URL";
const DEFAULT_DB_URL: &str = "sqlite://fitstreak.db?mode=rwc";

/// Database location, resolved from the environment
#[derive(Debug, Clone)]
pub struct DbConfig {
  pub url: String,
}

impl DbConfig {
  /// Read `FITSTREAK_DATABASE_URL` (a .env file is honored), falling back
  /// to an on-disk database in the working directory
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();

    let url = env::var(DB_URL_ENV).unwrap_or_else(|_| DEFAULT_DB_URL.to_string());
    Self { url }
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
  tracing::info!(url = %config.url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&config.url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database ready");
  Ok(pool)
}
