pub mod algorithm;
pub mod claims;
pub mod errors;
pub mod handler;

pub use algorithm::SigningAlgorithm;
pub use claims::TokenClaims;
pub use errors::JwtError;
pub use handler::JwtHandler;
