//! Display formatting for a pet's profile.

use chrono::{DateTime, Datelike, NaiveDate};

use crate::models::Pet;

/// Shown for values the record does not have.
pub const PLACEHOLDER: &str = "--";

/// Shown for allergies, which the remote schema does not carry.
pub const NO_ALLERGIES: &str = "None";

/// Display-ready fields of a pet's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PetDetails {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub image: String,
    pub age: String,
    pub birthdate: String,
    pub weight: String,
    pub gender: String,
    pub breed: String,
    pub microchip: String,
    pub allergies: String,
    pub vet_contact: String,
}

impl PetDetails {
    /// Derive display fields from a raw record, with ages computed as of `today`.
    pub fn from_pet(pet: &Pet, today: NaiveDate) -> Self {
        let born = parse_birthdate(&pet.birthdate);

        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            kind: pet.kind.clone(),
            image: pet.img.clone(),
            age: born
                .map(|born| format_age(months_between(born, today)))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            birthdate: born
                .map(|born| born.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            weight: format_weight(pet.weight),
            gender: or_placeholder(capitalize_first(&pet.gender)),
            breed: or_placeholder(pet.breed.trim().to_string()),
            microchip: PLACEHOLDER.to_string(),
            allergies: NO_ALLERGIES.to_string(),
            vet_contact: PLACEHOLDER.to_string(),
        }
    }

    /// Screen title.
    pub fn title(&self) -> String {
        format!("{}'s profile", self.name)
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Weight", self.weight.as_str()),
            ("Age", self.age.as_str()),
            ("Date of birth", self.birthdate.as_str()),
            ("Gender", self.gender.as_str()),
            ("Breed", self.breed.as_str()),
            ("Microchip number", self.microchip.as_str()),
            ("Allergies", self.allergies.as_str()),
            ("Vet clinic contact", self.vet_contact.as_str()),
        ]
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Whole calendar months from `from` to `to`, never negative.
///
/// A month only counts once its day-of-month has been reached.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// `"{n} months"` under a year, `"{years} years"` from then on.
pub fn format_age(months: u32) -> String {
    if months < 12 {
        format!("{} months", months)
    } else {
        format!("{} years", months / 12)
    }
}

/// `"{weight} kg"`, using the shortest representation (`10`, `12.5`).
pub fn format_weight(weight: f64) -> String {
    format!("{} kg", weight)
}

/// Upper-case the first character and leave the rest unchanged.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}
