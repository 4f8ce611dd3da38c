//! Add-pet form.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::PetClient;
use crate::models::{CreatePet, Gender, Pet};
use crate::traits::HttpClient;

/// Shown when a required field is blank.
pub const VALIDATION_MESSAGE: &str = "Please fill in all required fields";

/// Breed sent when the field is left blank.
pub const UNKNOWN_BREED: &str = "Unknown";

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddPetForm {
    pub name: String,
    pub kind: String,
    pub breed: String,
    /// Kilograms, as typed
    pub weight: String,
    pub gender: Gender,
    /// Empty means "now"
    pub birthdate: String,
}

impl AddPetForm {
    /// Name, type and weight are required.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.kind.trim().is_empty()
            && !self.weight.trim().is_empty()
    }

    /// Build the request body, filling defaults for optional fields.
    ///
    /// The weight is the longest leading number in the field (`"10kg"` is
    /// 10); no number, or a non-finite one, is sent as 0.
    pub fn to_create(&self, now: DateTime<Utc>) -> CreatePet {
        let breed = self.breed.trim();
        let birthdate = self.birthdate.trim();
        CreatePet {
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            breed: if breed.is_empty() {
                UNKNOWN_BREED.to_string()
            } else {
                breed.to_string()
            },
            weight: parse_weight(&self.weight),
            gender: self.gender.as_str().to_string(),
            birthdate: if birthdate.is_empty() {
                now.to_rfc3339_opts(SecondsFormat::Millis, true)
            } else {
                birthdate.to_string()
            },
            img: None,
        }
    }
}

/// Leading decimal number of `raw`, ignoring whatever follows it.
fn parse_weight(raw: &str) -> f64 {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .unwrap_or(0.0)
}

/// Submits [`AddPetForm`]s.
pub struct AddPetViewModel<C: HttpClient> {
    client: Arc<PetClient<C>>,
    saving: AtomicBool,
}

impl<C: HttpClient> AddPetViewModel<C> {
    pub fn new(client: Arc<PetClient<C>>) -> Self {
        Self {
            client,
            saving: AtomicBool::new(false),
        }
    }

    /// Whether a submit is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Validate and create. An invalid form is rejected without a request.
    ///
    /// On failure the error is the message to show the user.
    pub async fn submit(&self, form: &AddPetForm) -> Result<Pet, String> {
        if !form.is_valid() {
            debug!("add pet form rejected");
            return Err(VALIDATION_MESSAGE.to_string());
        }

        self.saving.store(true, Ordering::SeqCst);
        let result = self.client.create_pet(&form.to_create(Utc::now())).await;
        self.saving.store(false, Ordering::SeqCst);

        let pet = result.map_err(|e| e.to_string())?;
        info!(pet_id = %pet.id, "pet created");
        Ok(pet)
    }

    /// Confirmation text for a successful submit.
    pub fn success_message(form: &AddPetForm) -> String {
        format!("{} has been added successfully!", form.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use chrono::TimeZone;

    const BASE: &str = "https://pets.test/pets";

    fn form() -> AddPetForm {
        AddPetForm {
            name: " Rex ".to_string(),
            kind: "Dog".to_string(),
            weight: "10".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(form().is_valid());
        assert!(!AddPetForm {
            weight: "  ".to_string(),
            ..form()
        }
        .is_valid());
        assert!(!AddPetForm {
            kind: String::new(),
            ..form()
        }
        .is_valid());
    }

    #[test]
    fn test_defaults() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap();
        let body = AddPetForm {
            weight: "heavy".to_string(),
            ..form()
        }
        .to_create(now);

        assert_eq!(body.name, "Rex");
        assert_eq!(body.breed, "Unknown");
        assert_eq!(body.weight, 0.0);
        assert_eq!(body.gender, "male");
        assert_eq!(body.birthdate, "2025-05-01T08:30:00.000Z");
    }

    #[test]
    fn test_weight_takes_leading_number() {
        let weight_of = |raw: &str| {
            AddPetForm {
                weight: raw.to_string(),
                ..form()
            }
            .to_create(Utc::now())
            .weight
        };

        assert_eq!(weight_of("10kg"), 10.0);
        assert_eq!(weight_of("10 kg"), 10.0);
        assert_eq!(weight_of("12.5.1"), 12.5);
        assert_eq!(weight_of(" .5"), 0.5);
        assert_eq!(weight_of("-3"), -3.0);
        assert_eq!(weight_of("2e1x"), 20.0);
        assert_eq!(weight_of("7e"), 7.0);
    }

    #[test]
    fn test_weight_without_finite_number_is_zero() {
        for raw in ["NaN", "inf", "-infinity", "kg", ".", "-", "1e999"] {
            let body = AddPetForm {
                weight: raw.to_string(),
                ..form()
            }
            .to_create(Utc::now());

            assert_eq!(body.weight, 0.0, "weight {:?}", raw);
            let json = serde_json::to_value(&body).unwrap();
            assert_eq!(json["weight"], 0.0, "weight {:?}", raw);
        }
    }

    #[test]
    fn test_success_message() {
        let form = AddPetForm {
            name: "Rex".to_string(),
            ..form()
        };
        assert_eq!(
            AddPetViewModel::<MockHttpClient>::success_message(&form),
            "Rex has been added successfully!"
        );
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let http = MockHttpClient::new();
        let vm = AddPetViewModel::new(Arc::new(PetClient::with_base_url(http.clone(), BASE)));

        let err = vm.submit(&AddPetForm::default()).await.unwrap_err();

        assert_eq!(err, VALIDATION_MESSAGE);
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_creates_pet() {
        let http = MockHttpClient::new();
        http.set_response(
            "POST",
            BASE,
            MockResponse::json(
                201,
                r#"{"id":"12","name":"Rex","type":"Dog","breed":"Unknown","weight":10,"gender":"male"}"#,
            ),
        );
        let vm = AddPetViewModel::new(Arc::new(PetClient::with_base_url(http.clone(), BASE)));

        let pet = vm.submit(&form()).await.unwrap();

        assert_eq!(pet.id, "12");
        assert!(!vm.is_saving());
        let sent: serde_json::Value =
            serde_json::from_str(http.get_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["breed"], "Unknown");
        assert_eq!(sent["weight"], 10.0);
    }

    #[tokio::test]
    async fn test_submit_failure_message() {
        let http = MockHttpClient::new();
        http.set_response("POST", BASE, MockResponse::status(500));
        let vm = AddPetViewModel::new(Arc::new(PetClient::with_base_url(http, BASE)));

        let err = vm.submit(&form()).await.unwrap_err();

        assert_eq!(err, "Failed to create pet: HTTP error! status: 500");
        assert!(!vm.is_saving());
    }
}
