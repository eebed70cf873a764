pub mod admin;
pub mod awards;
pub mod fixtures;
pub mod players;
pub mod standings;
pub mod teams;
