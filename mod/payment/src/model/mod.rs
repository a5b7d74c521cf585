mod third_payment;

pub use third_payment::*;
