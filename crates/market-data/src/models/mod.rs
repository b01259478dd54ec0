//! Data models shared by providers and their consumers.

mod spot;

pub use spot::SpotPrice;
