pub mod model;
pub mod service;

pub use service::OrderService;
pub use service::order::{CreateOrderInput, order_trade_state_for_payment};
