//! Application services layer.

pub mod catalog;
pub mod error;
pub mod health;
pub mod orders;
pub mod repos;
pub mod sanitize;
