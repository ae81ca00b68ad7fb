pub use chess_core;

pub mod archive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod table;
