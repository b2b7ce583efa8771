//! File System Implementations

mod local;
mod project;

pub use local::LocalFs;
pub use project::{find_project_root, find_up};
