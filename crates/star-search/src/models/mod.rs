pub mod repository;
pub mod series;

pub use repository::*;
pub use series::*;
