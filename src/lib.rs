pub mod core;
pub mod models;
pub mod stores;
pub mod services;
pub mod wal;
pub mod validation;
pub mod utils;
