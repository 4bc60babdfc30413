pub mod calendar;
pub mod client;
pub mod pitch;
pub mod reservation;
pub mod slot;
pub mod user;
