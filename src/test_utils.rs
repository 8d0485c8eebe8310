//! Test utilities with lazy testcontainers support
//!
//! The PostgreSQL container is started on first use, migrated once, and
//! shared by every test in the binary.

use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{runners::AsyncRunner, ContainerAsync},
};
use tokio::sync::OnceCell;

use crate::db::{create_pool, run_migrations, PgStore};

static POSTGRES: OnceCell<(ContainerAsync<Postgres>, String)> = OnceCell::const_new();

/// Get or start the PostgreSQL container and return its connection URL
pub async fn postgres_url() -> String {
    let (_, url) = POSTGRES
        .get_or_init(|| async {
            let container = Postgres::default()
                .with_user("prorep")
                .with_password("prorep_test")
                .with_db_name("prorep_test")
                .start()
                .await
                .expect("Failed to start PostgreSQL container");

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();
            let url = format!("postgres://prorep:prorep_test@{}:{}/prorep_test", host, port);

            let pool = create_pool(&url, 1).await.expect("Failed to connect to test database");
            run_migrations(&pool).await.expect("Failed to run migrations");
            pool.close().await;

            (container, url)
        })
        .await;
    url.clone()
}

/// A [`PgStore`] on the shared container, with a pool owned by the calling runtime
pub async fn pg_store() -> PgStore {
    let pool = create_pool(&postgres_url().await, 8)
        .await
        .expect("Failed to connect to test database");
    PgStore::new(pool)
}
