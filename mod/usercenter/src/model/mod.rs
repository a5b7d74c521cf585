mod user;
mod user_auth;

pub use user::*;
pub use user_auth::*;
