pub mod boards;
pub mod config;
pub mod health;
