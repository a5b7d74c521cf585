mod homestay;
mod homestay_activity;
mod homestay_comment;

pub use homestay::*;
pub use homestay_activity::*;
pub use homestay_comment::*;
