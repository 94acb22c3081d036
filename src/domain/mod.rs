pub mod catalog;
pub mod input;
pub mod tariff;

pub use catalog::*;
pub use input::*;
pub use tariff::*;
