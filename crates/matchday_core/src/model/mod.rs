pub mod records;
pub mod results;

pub use records::{GameFrame, GameRecord, RawGameRow, NO_PROMOTION};
pub use results::*;
