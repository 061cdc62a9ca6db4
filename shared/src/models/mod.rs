//! Domain models shared between the storefront service and its clients

pub mod cart;
pub mod order;
pub mod stock;

pub use cart::{AddToCartRequest, CartLine, UpdateCartRequest};
pub use order::{
    AdminOrderLine, Order, OrderDetail, OrderHistoryItem, OrderHistoryResponse, OrderLine,
    OrderSummary, PaymentMethod, PlaceOrderRequest, PlaceOrderResponse,
};
pub use stock::{StockAdjustRequest, StockAdjustResponse, StockOperation};
