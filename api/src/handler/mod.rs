pub mod admin;
pub mod auth;
pub mod availability;
pub mod health;
pub mod pages;
pub mod reservation;

#[cfg(test)]
mod tests;
