pub mod result;
pub mod tournament;
