pub mod currency;
pub mod error;
pub mod numeric;

pub use currency::{round2, Currency};
pub use error::{AppError, Result};
