//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub owner_count: usize,
    pub dog_count: usize,
}

/// Display the landing page with record counts.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<HomeTemplate> {
    let owner_count = state.owners().find_all().await?.len();
    let dog_count = state.dogs().find_all().await?.len();

    Ok(HomeTemplate {
        user: Some(user),
        owner_count,
        dog_count,
    })
}
