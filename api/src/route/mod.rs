pub mod health;
pub mod reservation;
pub mod resource;
pub mod v1;
