pub mod clock;
pub mod cooldown;
pub mod repository;
pub mod types;
