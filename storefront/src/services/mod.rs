//! Transactional business operations
//!
//! Order placement and stock adjustment are the only writers of
//! `appliance_details.stock_quantity`.

pub mod order_placement;
pub mod stock_adjustment;

pub use order_placement::{PlaceOrder, place_order};
pub use stock_adjustment::adjust_stock;
