// Location Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;


pub use error::{AppError, Result};

use services::{AuthService, LocationService};

/// Shared application state injected into handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub locations: LocationService,
}

impl AppState {
    pub fn new(auth: AuthService, locations: LocationService) -> Self {
        Self { auth, locations }
    }
}
