pub mod models;
pub mod normal;
pub mod precision;
