//! Common test utilities for integration tests.
//!
//! Fixtures for pet records and helpers for wiring a [`PetClient`] to a
//! `wiremock` server.

use mypets::adapters::ReqwestHttpClient;
use mypets::api::PetClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Path of the pets collection on the mock server.
pub const PETS_PATH: &str = "/pets";

/// A complete pet record as the service returns it.
pub fn sample_pet_json(id: &str, name: &str, kind: &str) -> Value {
    json!({
        "createdAt": "2025-09-01T10:00:00.000Z",
        "name": name,
        "type": kind,
        "img": format!("https://images.test/{}.jpg", id),
        "breed": "Mixed",
        "birthdate": "2023-03-15",
        "gender": "female",
        "weight": 6.3,
        "id": id
    })
}

/// Two pets, ids "1" and "2".
pub fn sample_pets_json() -> Value {
    json!([
        sample_pet_json("1", "Marta", "Cat"),
        sample_pet_json("2", "Robert", "Dog"),
    ])
}

/// A client pointed at `server`'s pets collection.
pub fn client_for(server: &MockServer) -> PetClient<ReqwestHttpClient> {
    PetClient::with_base_url(
        ReqwestHttpClient::new(),
        format!("{}{}", server.uri(), PETS_PATH),
    )
}
