pub mod config;
pub mod database;
pub mod datastore;
pub mod entities;
pub mod game;
pub mod repositories;
pub mod shared;

pub use datastore::DataStore;
