pub mod api;
pub mod config;
pub mod error;
pub mod estimation;
pub mod household;
pub mod state;
pub mod tips;
