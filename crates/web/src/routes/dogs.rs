//! Dog route handlers.
//!
//! Dogs are created and listed under their owner's URL
//! (`/owners/{owner_id}/dogs/...`) and shown or edited under `/dogs/{dog_id}`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use pet_city_core::{DogId, PetOwnerId};

use super::{IdPath, require_positive_id};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Dog, PetOwner};
use crate::services::{
    DogForm, DogService, EntityKind, FieldErrors, PetOwnerService, ServiceError,
};
use crate::state::AppState;

fn owner_dogs_url(owner_id: PetOwnerId) -> String {
    format!("/owners/{owner_id}/dogs")
}

fn dog_service(state: &AppState) -> DogService<'_> {
    DogService::new(state.dogs(), state.owners())
}

// =============================================================================
// Templates
// =============================================================================

/// An owner's dogs, or a message when there are none.
#[derive(Template, WebTemplate)]
#[template(path = "dogs/owner_dogs.html")]
pub struct OwnerDogsTemplate {
    pub user: Option<CurrentUser>,
    pub owner: PetOwner,
    pub dogs: Vec<Dog>,
    pub message: Option<String>,
}

/// New dog form.
#[derive(Template, WebTemplate)]
#[template(path = "dogs/create.html")]
pub struct CreateDogTemplate {
    pub user: Option<CurrentUser>,
    pub owner: PetOwner,
    pub form: DogForm,
    pub errors: FieldErrors,
}

/// Single dog with its owner.
#[derive(Template, WebTemplate)]
#[template(path = "dogs/details.html")]
pub struct DogDetailsTemplate {
    pub user: Option<CurrentUser>,
    pub dog: Dog,
    pub owner: PetOwner,
}

/// Edit dog form.
#[derive(Template, WebTemplate)]
#[template(path = "dogs/update.html")]
pub struct UpdateDogTemplate {
    pub user: Option<CurrentUser>,
    pub dog_id: DogId,
    pub owner_id: PetOwnerId,
    pub form: DogForm,
    pub errors: FieldErrors,
}

// =============================================================================
// Routes
// =============================================================================

/// List an owner's dogs.
#[instrument(skip(state, user))]
pub async fn owner_dogs(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
) -> Result<OwnerDogsTemplate> {
    let owner_id = PetOwnerId::new(owner_id);
    let owner = PetOwnerService::new(state.owners())
        .get_by_id(owner_id)
        .await?;

    let (dogs, message) = match dog_service(&state).list_by_owner(owner_id).await {
        Ok(dogs) => (dogs, None),
        Err(e) if matches!(e, ServiceError::NotFound { kind: EntityKind::Dog, id: None }) => {
            (Vec::new(), Some(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(OwnerDogsTemplate {
        user: Some(user),
        owner,
        dogs,
        message,
    })
}

/// Display the new dog form for an existing owner.
#[instrument(skip(state, user))]
pub async fn create_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
) -> Result<CreateDogTemplate> {
    let owner = PetOwnerService::new(state.owners())
        .get_by_id(PetOwnerId::new(owner_id))
        .await?;

    Ok(CreateDogTemplate {
        user: Some(user),
        owner,
        form: DogForm::default(),
        errors: FieldErrors::new(),
    })
}

/// Create a dog under an owner, then show the owner's dogs.
#[instrument(skip(state, user))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
    Form(form): Form<DogForm>,
) -> Result<Response> {
    let owner_id = PetOwnerId::new(owner_id);

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let owner = PetOwnerService::new(state.owners())
                .get_by_id(owner_id)
                .await?;
            let page = CreateDogTemplate {
                user: Some(user),
                owner,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    dog_service(&state).create(owner_id, &details).await?;
    Ok(Redirect::to(&owner_dogs_url(owner_id)).into_response())
}

/// Show one dog.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(dog_id): IdPath<i32>,
) -> Result<DogDetailsTemplate> {
    let dog = dog_service(&state).get_by_id(DogId::new(dog_id)).await?;
    let owner = PetOwnerService::new(state.owners())
        .get_by_id(dog.owner_id)
        .await?;

    Ok(DogDetailsTemplate {
        user: Some(user),
        dog,
        owner,
    })
}

/// Display the edit form prefilled with the stored dog.
#[instrument(skip(state, user))]
pub async fn update_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(dog_id): IdPath<i32>,
) -> Result<UpdateDogTemplate> {
    let dog = dog_service(&state).get_by_id(DogId::new(dog_id)).await?;

    Ok(UpdateDogTemplate {
        user: Some(user),
        dog_id: dog.id,
        owner_id: dog.owner_id,
        form: DogForm::from_dog(&dog),
        errors: FieldErrors::new(),
    })
}

/// Replace a dog's name and age.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(dog_id): IdPath<i32>,
    Form(form): Form<DogForm>,
) -> Result<Response> {
    let service = dog_service(&state);
    let dog_id = DogId::new(dog_id);

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let dog = service.get_by_id(dog_id).await?;
            let page = UpdateDogTemplate {
                user: Some(user),
                dog_id,
                owner_id: dog.owner_id,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    service.update(dog_id, details).await?;
    Ok(Redirect::to(&format!("/dogs/{dog_id}")).into_response())
}

/// Delete one of an owner's dogs.
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    IdPath((owner_id, dog_id)): IdPath<(i32, i32)>,
) -> Result<Redirect> {
    let owner_id = PetOwnerId::new(require_positive_id(owner_id)?);
    let dog_id = DogId::new(require_positive_id(dog_id)?);
    let service = dog_service(&state);

    let dog = service.get_by_id(dog_id).await?;
    if dog.owner_id != owner_id {
        tracing::info!(%dog_id, %owner_id, "Dog belongs to another owner");
        return Err(ServiceError::not_found(EntityKind::Dog, dog_id.as_i32()).into());
    }

    service.delete(dog_id).await?;
    Ok(Redirect::to(&owner_dogs_url(owner_id)))
}
