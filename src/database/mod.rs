pub mod models;
pub mod pool;
pub mod repository;
pub mod schema;
