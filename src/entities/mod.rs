pub mod film;
pub mod review;
pub mod user;
