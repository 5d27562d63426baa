pub mod competitors;
pub mod rankings;
pub mod results;
