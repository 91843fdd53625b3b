pub mod error;
pub mod forms;
pub mod models;
pub mod repositories;
pub mod services;
