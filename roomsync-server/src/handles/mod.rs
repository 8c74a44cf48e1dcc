mod auth_handle;
mod room_handle;

pub use auth_handle::*;
pub use room_handle::*;
