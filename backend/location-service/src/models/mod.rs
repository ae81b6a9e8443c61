pub mod location;
pub mod token_revocation;
pub mod user;

pub use location::{
    CreateLocationRequest, DeleteLocationRequest, Location, LocationResponse,
    UpdateLocationRequest,
};
pub use token_revocation::RevokedToken;
pub use user::{
    AccessTokenResponse, CredentialsRequest, LoginResponse, MessageResponse, SecretResponse, User,
};
