pub mod logging;
pub mod recover;

pub use logging::*;
pub use recover::*;
