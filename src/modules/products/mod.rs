pub mod models;

pub use models::{Product, ProductKind};
