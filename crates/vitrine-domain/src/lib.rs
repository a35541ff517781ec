//! Domain layer for vitrine: catalog and reservation models, repository
//! traits, and pure services shared by the store and the application layer.

pub mod model;
pub mod repository;
pub mod service;
