mod auth_service;
mod room_service;
mod token_service;

pub use auth_service::*;
pub use room_service::*;
pub use token_service::*;
