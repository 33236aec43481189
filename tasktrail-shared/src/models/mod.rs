/// Database models for Tasktrail
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and profile updates
/// - `task`: Personal tasks, always scoped to their owner
///
/// # Example
///
/// ```no_run
/// use tasktrail_shared::models::user::{CreateUser, User};
/// use tasktrail_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Jane".to_string(),
///         email: "jane@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
