pub mod catalog;
pub mod order;

pub use catalog::*;
pub use order::*;
