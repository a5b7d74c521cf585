pub mod model;
pub mod service;

pub use service::TravelService;
pub use service::comment::average_star;
