//! Profile handlers

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::feed::{render_profile, render_profile_error};
use crate::AppState;

/// GET /users/:username
///
/// Profile fragment for the modal. Lookup failures are rendered in place of
/// the profile rather than returned as HTTP errors.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Html<String> {
    match state.profiles.fetch_profile(&username).await {
        Ok(profile) => Html(render_profile(&profile)),
        Err(e) => {
            tracing::warn!("Profile lookup for {} failed: {}", username, e);
            Html(render_profile_error(&e))
        }
    }
}
