pub mod error;
pub mod units;

pub use error::GameError;
pub use units::{format_ether, parse_ether, parse_quantity, UnitError, WEI_PER_ETHER};
