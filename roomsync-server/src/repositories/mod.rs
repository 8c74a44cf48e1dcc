mod room_lock;
mod room_state;
mod user;

pub use room_lock::RoomLocks;
pub use room_state::RoomStateRepository;
pub use user::UserRepository;
