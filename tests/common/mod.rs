#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::sync::Mutex;
use url_alias::application::services::LinkService;
use url_alias::config::BasicAuth;
use url_alias::infrastructure::persistence::{SqliteLinkRepository, run_migrations};
use url_alias::routes::app_router;
use url_alias::state::AppState;
use url_alias::utils::alias_generator::{AliasGenerator, RandomAliasGenerator};

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";
/// `Basic base64("admin:secret")`
pub const TEST_AUTH_HEADER: &str = "Basic YWRtaW46c2VjcmV0";

/// Fresh in-memory database with migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();

    pool
}

pub async fn create_test_link(pool: &SqlitePool, alias: &str, url: &str) -> i64 {
    sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
        .bind(alias)
        .bind(url)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links_for_url(pool: &SqlitePool, url: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url WHERE url = ?")
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_service(
    pool: SqlitePool,
) -> Arc<LinkService<SqliteLinkRepository, RandomAliasGenerator>> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    Arc::new(LinkService::new(repo, Arc::new(RandomAliasGenerator::new()), 8))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(create_test_service(pool), None)
}

pub fn create_test_state_with_auth(pool: SqlitePool) -> AppState {
    AppState::new(
        create_test_service(pool),
        Some(BasicAuth::new(TEST_USER, TEST_PASSWORD)),
    )
}

/// Test server over the full application stack, middleware included.
pub fn test_server(state: AppState) -> TestServer {
    let app = Router::new().fallback_service(app_router(state));
    TestServer::new(app).unwrap()
}

/// Generator replaying a fixed script of candidates, repeating the last one.
pub struct ScriptedGenerator {
    candidates: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(candidates: &[&str]) -> Self {
        let mut candidates: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        candidates.reverse();
        Self {
            candidates: Mutex::new(candidates),
        }
    }
}

impl AliasGenerator for ScriptedGenerator {
    fn generate(&self, _length: usize) -> String {
        let mut candidates = self.candidates.lock().unwrap();
        if candidates.len() > 1 {
            candidates.pop().unwrap()
        } else {
            candidates.last().cloned().unwrap_or_default()
        }
    }
}

pub fn create_scripted_service(
    pool: SqlitePool,
    candidates: &[&str],
) -> LinkService<SqliteLinkRepository, ScriptedGenerator> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    LinkService::new(repo, Arc::new(ScriptedGenerator::new(candidates)), 8)
}
