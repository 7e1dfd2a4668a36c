use std::path::{Path, PathBuf};

use rentwatch::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool, SqliteSeenStore};
use tempfile::TempDir;

/// Temporary on-disk SQLite database for integration tests.
///
/// The directory, and the database in it, is removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("rentwatch-{name}.db"));

        let pool = create_pool(&path.to_string_lossy()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// A store on a fresh pool over the same file.
    pub fn reopen(&self) -> SqliteSeenStore {
        let pool = create_pool(&self.path.to_string_lossy()).expect("reopen sqlite pool");
        run_migrations(&pool).expect("run migrations");
        SqliteSeenStore::new(pool)
    }

    pub fn store(&self) -> SqliteSeenStore {
        SqliteSeenStore::new(self.pool.clone())
    }
}
