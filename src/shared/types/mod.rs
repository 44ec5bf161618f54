pub mod errors;
pub mod pagination;
pub mod time;

pub use errors::*;
pub use pagination::*;
pub use time::*;
