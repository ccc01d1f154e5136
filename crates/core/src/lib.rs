// Core client for the Brewfather v2 API

pub mod client;
pub mod config;
pub mod error;

pub use client::BrewfatherClient;
pub use config::Credentials;
pub use error::{BrewfatherError, BrewfatherResult};
