mod homestay_order;

pub use homestay_order::*;
