//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ProfileResponse, TableQuery};
use crate::reporting::{ProfileSummary, summarize};
use crate::table::ProfileRow;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

/// Lists every profile with summary statistics.
///
/// `GET /profiles` → 200 + `Vec<ProfileSummary>` JSON
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> Json<Vec<ProfileSummary>> {
    Json(summarize(&state.profiles))
}

/// Returns one profile by name.
///
/// `GET /profiles/{name}` → 200 + `ProfileResponse` JSON, or 404
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    state
        .profiles
        .get(&name)
        .map(|p| Json(ProfileResponse::from(p)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown profile `{name}`")))
}

/// Returns table rows, optionally filtered by profile and hour range.
///
/// `GET /table` → 200 + `Vec<ProfileRow>` JSON
/// `GET /table?profile=Grid%20Energy&from=N&to=M` → filtered rows (inclusive)
/// `GET /table?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_table(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TableQuery>,
) -> Result<Json<Vec<ProfileRow>>, ApiError> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("`from` ({from}) must be <= `to` ({to})"),
        ));
    }
    if let Some(ref name) = query.profile {
        if state.profiles.get(name).is_none() {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                format!("unknown profile `{name}`"),
            ));
        }
    }

    let rows = state
        .table
        .rows()
        .iter()
        .filter(|r| query.profile.as_ref().is_none_or(|p| &r.profile == p))
        .filter(|r| r.hour >= from && r.hour <= to)
        .cloned()
        .collect();

    Ok(Json(rows))
}
