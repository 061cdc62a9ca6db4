//! Authentication boundary

pub mod session;

pub use session::{AdminUser, SESSION_COOKIE, SessionUser, create_token};
