/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `users`: Profile endpoints (get, update)
/// - `tasks`: Task command handlers (create, get, update, delete, list)

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
