#[warn(unused_imports)]
#[macro_export]
macro_rules! test_with_db {
    ($name:ident, |$ctx_state:ident, $config:ident| $body:block) => {

        #[tokio::test(flavor="multi_thread")]
        #[serial_test::serial]
        async fn $name() {
            use std::sync::Arc;
            use blog_server::config::AppConfig;
            use blog_server::database::client::{Database, DbConfig};
            use blog_server::middleware::mw_ctx::create_ctx_state;
            use blog_server::utils::cache::memory_map_cache::MemoryMapCache;
            use futures::FutureExt;
            use std::panic::resume_unwind;

            let $config = AppConfig {
                db_namespace: "test".to_string(),
                db_database: "test".to_string(),
                db_password: None,
                db_username: None,
                db_url: "mem://".to_string(),
                redis_url: None,
                redis_host: "localhost".to_string(),
                redis_port: 6379,
                redis_db: 0,
                likes_sync_threshold: 3,
                likes_flush_interval_secs: 0,
                sentry_project_link: None,
            };

            let $ctx_state = {
                let db = Database::connect(DbConfig {
                    url: &$config.db_url,
                    database: &$config.db_database,
                    namespace: &$config.db_namespace,
                    password: $config.db_password.as_deref(),
                    username: $config.db_username.as_deref(),
                })
                .await
                .expect("db connects");

                blog_server::init::run_migrations(&db).await.unwrap();
                create_ctx_state(db, Arc::new(MemoryMapCache::new()), &$config)
            };

            let test_result = std::panic::AssertUnwindSafe(async {
                (|| async $body)().await;
            })
            .catch_unwind()
            .await;

            $ctx_state.clone().db.client
                .query(format!("REMOVE DATABASE {};", $config.db_database))
                .await
                .expect("failed to remove database");

            if let Err(panic) = test_result {
                resume_unwind(panic);
            }
        }
    };
}
