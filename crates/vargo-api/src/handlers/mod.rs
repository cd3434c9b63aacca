pub mod health;
pub mod policies;
pub mod upload;
