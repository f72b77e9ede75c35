pub mod health;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod user;
