pub mod bootstrap;
pub mod builder;
pub mod entity;
pub mod store;

pub use bootstrap::open_backends;
pub use builder::SelectBuilder;
pub use entity::{DelState, Entity, row_f64, row_i64, row_opt_str, row_str};
pub use store::EntityStore;
