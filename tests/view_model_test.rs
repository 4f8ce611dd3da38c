//! View-models end to end over HTTP.

mod common;

use chrono::NaiveDate;
use common::{client_for, sample_pet_json, sample_pets_json, PETS_PATH};
use mypets::state::FavoritesStore;
use mypets::view_model::{
    AddPetForm, AddPetViewModel, LoadState, PetDetailViewModel, PetFilter, PetListViewModel,
    VALIDATION_MESSAGE,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_then_favorite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_pets_json()))
        .mount(&server)
        .await;

    let favorites = FavoritesStore::new();
    let vm = PetListViewModel::new(Arc::new(client_for(&server)), favorites.clone());
    vm.load().await;

    assert!(vm.toggle_favorite("1"));
    assert!(favorites.contains("1"));

    let only_favorites = vm.filtered_items(&PetFilter::default().favorites_only(true));
    assert_eq!(only_favorites.len(), 1);
    assert_eq!(only_favorites[0].pet.name, "Marta");
    assert_eq!(only_favorites[0].type_label, "Your Cat");
}

#[tokio::test]
async fn test_list_failure_then_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PETS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_pets_json()))
        .mount(&server)
        .await;

    let vm = PetListViewModel::new(Arc::new(client_for(&server)), FavoritesStore::new());

    vm.load().await;
    assert_eq!(
        vm.state(),
        LoadState::Failed("Failed to fetch pets: HTTP error! status: 503".to_string())
    );

    vm.retry().await;
    assert_eq!(vm.items().len(), 2);
}

#[tokio::test]
async fn test_detail_formats_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_pet_json("1", "Marta", "Cat")))
        .mount(&server)
        .await;

    let vm = PetDetailViewModel::with_clock(
        Arc::new(client_for(&server)),
        Arc::new(|| NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()),
    );
    assert!(vm.load("1").await);

    let state = vm.state();
    let details = state.data().unwrap();
    assert_eq!(details.title(), "Marta's profile");
    assert_eq!(details.age, "10 months");
    assert_eq!(details.birthdate, "15/03/2023");
    assert_eq!(details.weight, "6.3 kg");
    assert_eq!(details.gender, "Female");
    assert_eq!(details.allergies, "None");
}

#[tokio::test]
async fn test_add_pet_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PETS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_pet_json("9", "Rex", "Dog")))
        .expect(1)
        .mount(&server)
        .await;

    let vm = AddPetViewModel::new(Arc::new(client_for(&server)));

    let invalid = vm.submit(&AddPetForm::default()).await.unwrap_err();
    assert_eq!(invalid, VALIDATION_MESSAGE);

    let form = AddPetForm {
        name: "Rex".to_string(),
        kind: "Dog".to_string(),
        weight: "10".to_string(),
        ..Default::default()
    };
    let pet = vm.submit(&form).await.unwrap();
    assert_eq!(pet.id, "9");
    assert_eq!(
        AddPetViewModel::<mypets::adapters::ReqwestHttpClient>::success_message(&form),
        "Rex has been added successfully!"
    );
}
