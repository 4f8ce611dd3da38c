//! Remote API clients.

pub mod pets;

pub use pets::{PetClient, PETS_API_URL};
