//! storefront: order placement, stock management and cart API for the
//! appliance store
//!
//! - Order placement: one transaction per checkout (order, line, stock)
//! - Stock adjustment: atomic add/remove, floored at zero and capped
//! - Cart, order history, admin order listing, password change

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod money;
pub mod services;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
