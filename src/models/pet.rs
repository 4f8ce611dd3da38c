//! Pet records as exchanged with the remote collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{deserialize_id, deserialize_nullable_string, deserialize_weight};

/// A pet record owned by the remote service.
///
/// Copies held by the client are read-mostly snapshots; `gender` is kept as
/// free text because the server does not enforce the male/female vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Server-assigned identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Species tag, e.g. "Dog" (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
    /// Image URL
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub img: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub breed: String,
    /// Date string, either `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub birthdate: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub gender: String,
    /// Weight in kilograms
    #[serde(default, deserialize_with = "deserialize_weight")]
    pub weight: f64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub breed: String,
    pub weight: f64,
    pub gender: String,
    pub birthdate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

/// Body of an update request. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl UpdatePet {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Gender choices offered when adding a pet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither "male" nor "female".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender '{0}', expected male or female")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(ParseGenderError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_deserialize_full() {
        let json = r#"{
            "id": "2",
            "name": "Robert",
            "type": "Dog",
            "img": "https://example.com/robert.png",
            "breed": "Golden Retriever",
            "birthdate": "2023-03-15",
            "gender": "male",
            "weight": 12.5,
            "createdAt": "2025-01-01T10:00:00.000Z"
        }"#;

        let pet: Pet = serde_json::from_str(json).unwrap();
        assert_eq!(pet.id, "2");
        assert_eq!(pet.kind, "Dog");
        assert_eq!(pet.weight, 12.5);
        assert_eq!(pet.created_at, "2025-01-01T10:00:00.000Z");
    }

    #[test]
    fn test_pet_deserialize_tolerates_gaps() {
        let json = r#"{"id": 7, "name": "Marta", "type": "Cat", "breed": null, "weight": "6.3"}"#;

        let pet: Pet = serde_json::from_str(json).unwrap();
        assert_eq!(pet.id, "7");
        assert_eq!(pet.breed, "");
        assert_eq!(pet.img, "");
        assert_eq!(pet.weight, 6.3);
    }

    #[test]
    fn test_pet_missing_name_is_error() {
        let json = r#"{"id": "1", "type": "Cat"}"#;
        assert!(serde_json::from_str::<Pet>(json).is_err());
    }

    #[test]
    fn test_create_pet_wire_format() {
        let body = CreatePet {
            name: "Rex".to_string(),
            kind: "Dog".to_string(),
            breed: String::new(),
            weight: 10.0,
            gender: "male".to_string(),
            birthdate: "2024-01-01".to_string(),
            img: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], "Dog");
        assert_eq!(value["breed"], "");
        assert!(value.get("img").is_none());
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_update_pet_sends_only_set_fields() {
        let update = UpdatePet {
            name: Some("Max".to_string()),
            weight: Some(4.2),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["name"], "Max");
        assert!(!update.is_empty());
        assert!(UpdatePet::default().is_empty());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.to_string(), "female");
    }
}
