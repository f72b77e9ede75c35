pub mod health;
pub mod mail;
pub mod memory;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod session;
pub mod user;
