pub mod interview;
pub mod request;
pub mod response;

pub use interview::*;
pub use request::*;
pub use response::*;
