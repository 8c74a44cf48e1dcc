mod room_state;
mod user;

pub use room_state::{RoomStateRow, RoomStateTable};
pub use user::{User, UserTable};

pub trait Table: Send + Sync {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;

    /// Columns that must exist on an already created table, as `(name, definition)`.
    /// Missing ones are added at bootstrap.
    fn columns(&self) -> Vec<(&'static str, &'static str)> {
        vec![]
    }
}
