pub mod audit;
pub mod reservation;
pub mod studio;
pub mod user;
