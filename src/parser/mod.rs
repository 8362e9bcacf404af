pub mod capture;
pub mod decoder;
pub mod report;
pub mod stream;

pub use capture::*;
pub use decoder::*;
pub use report::*;
pub use stream::*;
