use crate::database::client::Database;
use crate::middleware::error::AppResult;

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    database.posts.mutate_db().await?;
    database.likes.mutate_db().await?;
    Ok(())
}
