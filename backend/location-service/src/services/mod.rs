pub mod auth;
pub mod locations;

pub use auth::AuthService;
pub use locations::LocationService;
