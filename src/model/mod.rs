pub mod config;
pub mod task;
pub mod undo;

pub use config::*;
pub use task::*;
pub use undo::*;
