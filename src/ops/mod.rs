pub mod repository;
pub mod undo_log;
pub mod undo_ops;
pub mod view;
