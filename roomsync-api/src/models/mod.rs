mod room;

pub use room::*;

pub type Id = i32;
