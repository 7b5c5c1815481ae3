pub mod purchase;
pub mod user;
pub mod winner;
