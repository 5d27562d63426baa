pub mod grouping;
pub mod result;
pub mod tournament;

pub use grouping::normalized_key;
pub use result::{NewTournamentResult, TournamentResult};
pub use tournament::Tournament;
