pub mod keys;
pub mod reports;
