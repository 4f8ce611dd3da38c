//! Client for the remote pet collection.
//!
//! Every call is a single best-effort attempt: no retries, no caching and no
//! timeout beyond what the underlying [`HttpClient`] imposes.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiErrorKind, ApiOperation, ApiResult};
use crate::models::{CreatePet, Pet, UpdatePet};
use crate::traits::{Headers, HttpClient, Response};

/// Default collection endpoint.
pub const PETS_API_URL: &str = "https://68b5f788e5dc090291b09b08.mockapi.io/pets";

/// Client for `GET/POST {base}` and `GET/PUT {base}/{id}`.
#[derive(Debug, Clone)]
pub struct PetClient<C: HttpClient> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> PetClient<C> {
    /// Create a client against the default collection endpoint.
    pub fn new(http: C) -> Self {
        Self::with_base_url(http, PETS_API_URL)
    }

    /// Create a client against a custom collection URL.
    ///
    /// A trailing slash is ignored.
    pub fn with_base_url(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http(&self) -> &C {
        &self.http
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// Fetch the whole collection.
    pub async fn list_pets(&self) -> ApiResult<Vec<Pet>> {
        let op = ApiOperation::FetchPets;
        debug!(url = %self.base_url, "fetching pets");

        let result: Result<Vec<Pet>, ApiErrorKind> = async {
            let response = self.http.get(&self.base_url, &Headers::new()).await?;
            decode(&response, None)
        }
        .await;

        finish(op, result)
    }

    /// Fetch one pet. A 404 becomes a not-found error.
    pub async fn get_pet(&self, id: &str) -> ApiResult<Pet> {
        let op = ApiOperation::FetchPet;
        let url = self.item_url(id);
        debug!(%url, "fetching pet");

        let result: Result<Pet, ApiErrorKind> = async {
            let response = self.http.get(&url, &Headers::new()).await?;
            decode(&response, Some(id))
        }
        .await;

        finish(op, result)
    }

    /// Create a pet and return the server's record, including its new id.
    ///
    /// The body is sent as given; any defaulting of empty fields is the
    /// caller's job.
    pub async fn create_pet(&self, pet: &CreatePet) -> ApiResult<Pet> {
        let op = ApiOperation::CreatePet;
        debug!(url = %self.base_url, name = %pet.name, "creating pet");

        let result: Result<Pet, ApiErrorKind> = async {
            let body = serde_json::to_string(pet)?;
            let response = self
                .http
                .post(&self.base_url, &body, &Self::json_headers())
                .await?;
            decode(&response, None)
        }
        .await;

        finish(op, result)
    }

    /// Apply a partial update. A 404 becomes a not-found error.
    pub async fn update_pet(&self, id: &str, changes: &UpdatePet) -> ApiResult<Pet> {
        let op = ApiOperation::UpdatePet;
        let url = self.item_url(id);
        debug!(%url, "updating pet");

        let result: Result<Pet, ApiErrorKind> = async {
            let body = serde_json::to_string(changes)?;
            let response = self.http.put(&url, &body, &Self::json_headers()).await?;
            decode(&response, Some(id))
        }
        .await;

        finish(op, result)
    }
}

/// Classify the status, then decode the body.
///
/// `item_id` is set for single-resource requests, where 404 means the pet
/// does not exist.
fn decode<T: DeserializeOwned>(
    response: &Response,
    item_id: Option<&str>,
) -> Result<T, ApiErrorKind> {
    if !response.is_success() {
        return Err(match (response.status, item_id) {
            (404, Some(id)) => ApiErrorKind::NotFound { id: id.to_string() },
            (status, _) => ApiErrorKind::Http { status },
        });
    }
    Ok(response.json()?)
}

fn finish<T>(op: ApiOperation, result: Result<T, ApiErrorKind>) -> ApiResult<T> {
    result.map_err(|kind| {
        let err = ApiError::new(op, kind);
        warn!(code = err.error_code(), "{}", err);
        err
    })
}
