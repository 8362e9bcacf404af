pub mod capture_log;
pub mod frame;
pub mod metadata;
pub mod schema;

pub use capture_log::*;
pub use frame::*;
pub use metadata::*;
pub use schema::*;
