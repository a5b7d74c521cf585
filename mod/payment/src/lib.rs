pub mod model;
pub mod service;

pub use service::PaymentService;
pub use service::payment::CreatePaymentInput;
