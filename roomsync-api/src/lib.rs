pub mod models;
pub mod registry;
pub mod restful;

pub use models::*;
pub use restful::*;
