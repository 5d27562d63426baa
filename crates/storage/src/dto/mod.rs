pub mod competitor;
pub mod ranking;
