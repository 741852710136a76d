use dotenvy;

use crate::services::post_service::DEFAULT_LIKES_SYNC_THRESHOLD;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub redis_url: Option<String>,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: u32,
    pub likes_sync_threshold: usize,
    pub likes_flush_interval_secs: u64,
    pub sentry_project_link: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let redis_url = std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty());
        let redis_host = std::env::var("REDIS_HOST").unwrap_or("localhost".to_string());
        let redis_port = std::env::var("REDIS_PORT").map_or(6379, |v| {
            v.parse::<u16>().expect("REDIS_PORT must be number")
        });
        let redis_db = std::env::var("REDIS_DB")
            .map_or(0, |v| v.parse::<u32>().expect("REDIS_DB must be number"));

        let likes_sync_threshold = std::env::var("LIKES_SYNC_THRESHOLD")
            .map_or(DEFAULT_LIKES_SYNC_THRESHOLD, |v| {
                v.parse::<usize>()
                    .expect("LIKES_SYNC_THRESHOLD must be number")
            });
        assert!(
            likes_sync_threshold >= 1,
            "LIKES_SYNC_THRESHOLD must be at least 1"
        );

        let likes_flush_interval_secs = std::env::var("LIKES_FLUSH_INTERVAL_SECS").map_or(60, |v| {
            v.parse::<u64>()
                .expect("LIKES_FLUSH_INTERVAL_SECS must be number")
        });

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            redis_url,
            redis_host,
            redis_port,
            redis_db,
            likes_sync_threshold,
            likes_flush_interval_secs,
            sentry_project_link,
        }
    }

    pub fn redis_uri(&self) -> String {
        match &self.redis_url {
            Some(url) => url.clone(),
            None => format!(
                "redis://{}:{}/{}",
                self.redis_host, self.redis_port, self.redis_db
            ),
        }
    }
}
