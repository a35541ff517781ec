//! Application service layer - config, logging, booking and admin use cases

pub mod admin;
pub mod booking;
pub mod config;
pub mod logging;
pub mod repository;
