pub mod config;
pub mod error;
pub mod output;
pub mod roster;
pub mod student;
pub mod transform;
