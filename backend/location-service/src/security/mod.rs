pub mod password;

pub use password::{PasswordHasher, PasswordSettings};
