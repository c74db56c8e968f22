//! Postgres test databases in a shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use testresult::TestResult;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::database;

const USER: &str = "shopease_test";
const PASSWORD: &str = "shopease_test_password";

/// The running container and the host address it is published on.
#[derive(Debug)]
struct SharedPostgres {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl SharedPostgres {
    async fn start() -> TestResult<Self> {
        let container = PostgresImage::default()
            .with_user(USER)
            .with_password(PASSWORD)
            .with_db_name("shopease_test")
            .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_unset| "localhost".to_string());

        Ok(Self {
            _container: container,
            host,
            port,
        })
    }

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{USER}:{PASSWORD}@{}:{}/{database}",
            self.host, self.port
        )
    }
}

/// Started once and reused by every test in the binary. Only the address is
/// read after startup, so tests on other runtimes never touch the Docker client.
static POSTGRES: Lazy<OnceCell<SharedPostgres>> = Lazy::new(OnceCell::new);

/// A freshly migrated database of its own for one test.
///
/// Databases are not dropped; they disappear with the container.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl TestDb {
    pub(crate) async fn new() -> TestResult<Self> {
        let postgres = POSTGRES.get_or_try_init(SharedPostgres::start).await?;

        let name = format!("shopease_test_{}", Uuid::now_v7().simple());

        let mut admin = PgConnection::connect(&postgres.url("postgres")).await?;
        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await?;
        admin.close().await?;

        let pool = database::connect(&postgres.url(&name)).await?;
        database::migrate(&pool).await?;

        Ok(Self { pool, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn databases_are_migrated_and_isolated() -> TestResult {
        let first = TestDb::new().await?;
        let second = TestDb::new().await?;

        assert_ne!(first.name, second.name);

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_name IN ('documents', 'cart_snapshots')",
        )
        .fetch_one(&first.pool)
        .await?;

        assert_eq!(tables, 2, "both tables should exist after migrating");

        Ok(())
    }
}
