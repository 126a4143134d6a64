//! Pet owner route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use pet_city_core::PetOwnerId;

use super::{IdPath, require_positive_id};
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{CurrentUser, PetOwner};
use crate::services::{EntityKind, FieldErrors, PetOwnerForm, PetOwnerService};
use crate::state::AppState;

const LIST_URL: &str = "/owners/list";

// =============================================================================
// Templates
// =============================================================================

/// All owners, or a message when there are none.
#[derive(Template, WebTemplate)]
#[template(path = "owners/list.html")]
pub struct OwnerListTemplate {
    pub user: Option<CurrentUser>,
    pub owners: Vec<PetOwner>,
    pub message: Option<String>,
}

/// New owner form.
#[derive(Template, WebTemplate)]
#[template(path = "owners/insert.html")]
pub struct InsertOwnerTemplate {
    pub user: Option<CurrentUser>,
    pub form: PetOwnerForm,
    pub errors: FieldErrors,
}

/// Edit owner form.
#[derive(Template, WebTemplate)]
#[template(path = "owners/update.html")]
pub struct UpdateOwnerTemplate {
    pub user: Option<CurrentUser>,
    pub owner_id: PetOwnerId,
    pub form: PetOwnerForm,
    pub errors: FieldErrors,
}

/// Single owner.
#[derive(Template, WebTemplate)]
#[template(path = "owners/details.html")]
pub struct OwnerDetailsTemplate {
    pub user: Option<CurrentUser>,
    pub owner: PetOwner,
}

// =============================================================================
// Routes
// =============================================================================

/// List every owner. An empty list is shown as a message, not an error.
#[instrument(skip(state, user))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<OwnerListTemplate> {
    let (owners, message) = match PetOwnerService::new(state.owners()).list().await {
        Ok(owners) => (owners, None),
        Err(e) if e.is_not_found(EntityKind::PetOwner) => (Vec::new(), Some(e.to_string())),
        Err(e) => return Err(e.into()),
    };

    Ok(OwnerListTemplate {
        user: Some(user),
        owners,
        message,
    })
}

/// Display the new owner form.
pub async fn insert_page(RequireAuth(user): RequireAuth) -> InsertOwnerTemplate {
    InsertOwnerTemplate {
        user: Some(user),
        form: PetOwnerForm::default(),
        errors: FieldErrors::new(),
    }
}

/// Create an owner from the submitted form.
///
/// Does not require a login.
#[instrument(skip(state, user))]
pub async fn insert(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<PetOwnerForm>,
) -> Result<Response> {
    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = InsertOwnerTemplate { user, form, errors };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    PetOwnerService::new(state.owners()).create(&details).await?;
    Ok(Redirect::to(LIST_URL).into_response())
}

/// Show one owner.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
) -> Result<OwnerDetailsTemplate> {
    let owner = PetOwnerService::new(state.owners())
        .get_by_id(PetOwnerId::new(owner_id))
        .await?;

    Ok(OwnerDetailsTemplate {
        user: Some(user),
        owner,
    })
}

/// Display the edit form prefilled with the stored owner.
#[instrument(skip(state, user))]
pub async fn update_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
) -> Result<UpdateOwnerTemplate> {
    let owner = PetOwnerService::new(state.owners())
        .get_by_id(PetOwnerId::new(owner_id))
        .await?;

    Ok(UpdateOwnerTemplate {
        user: Some(user),
        owner_id: owner.id,
        form: PetOwnerForm::from_owner(&owner),
        errors: FieldErrors::new(),
    })
}

/// Replace an owner's details.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
    Form(form): Form<PetOwnerForm>,
) -> Result<Response> {
    let owner_id = PetOwnerId::new(owner_id);
    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = UpdateOwnerTemplate {
                user: Some(user),
                owner_id,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    PetOwnerService::new(state.owners())
        .update(owner_id, details)
        .await?;
    Ok(Redirect::to(LIST_URL).into_response())
}

/// Delete an owner and their dogs.
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    IdPath(owner_id): IdPath<i32>,
) -> Result<Redirect> {
    let owner_id = PetOwnerId::new(require_positive_id(owner_id)?);

    PetOwnerService::new(state.owners()).delete(owner_id).await?;
    Ok(Redirect::to(LIST_URL))
}
