pub mod model;
pub mod service;

pub use service::UsercenterService;
pub use service::user::RegisterInput;
