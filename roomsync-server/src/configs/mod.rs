mod schema;
mod settings;
mod storage;

use std::env;
use std::io;
use std::path::PathBuf;

pub use schema::SchemaManager;
pub use settings::{Auth, Database, Logger, Server, Settings};
pub use storage::Storage;

fn project_root() -> io::Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // development and testing environments
        return Ok(PathBuf::from(manifest_dir));
    }

    // runtime root relative path `folder/executable` -> `folder/`
    let executable = env::current_exe()?;
    executable
        .parent()
        .map(|parent| parent.to_path_buf())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))
}

/// Resolves `~/`-prefixed paths against the project root, other paths are kept as is.
pub fn normalize_path(path: &str) -> io::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(relative) => Ok(project_root()?.join(relative)),
        None => Ok(PathBuf::from(path)),
    }
}
