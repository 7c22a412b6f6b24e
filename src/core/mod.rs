pub mod clock;
pub mod errors;
pub mod models;
pub mod policy;
pub mod services;
