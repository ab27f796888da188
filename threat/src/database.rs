use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use refinery::Report;
use rusqlite::Connection;

use crate::config::ThreatConfig;

mod embedded_world {
    use refinery::embed_migrations;
    embed_migrations!("../sql_migrations/world");
}

pub fn run_world_migrations(conn: &mut Connection) -> Result<Report, refinery::Error> {
    embedded_world::migrations::runner().run(conn)
}

pub fn world_pool(config: &ThreatConfig) -> Result<Pool<SqliteConnectionManager>, r2d2::Error> {
    r2d2::Pool::new(SqliteConnectionManager::file(config.world_database_path()))
}

// A single connection is required: every new in-memory connection is a brand new database
pub fn memory_pool() -> Result<Pool<SqliteConnectionManager>, r2d2::Error> {
    r2d2::Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
}
