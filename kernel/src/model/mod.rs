pub mod calendar;
pub mod date;
pub mod id;
pub mod mail;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod user;
