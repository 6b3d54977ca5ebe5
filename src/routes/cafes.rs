//! Cafe routes - read, create, update-price and report-closed operations

use axum::{
    extract::{Path, Query, State},
    Form, Json,
};
use rand::seq::SliceRandom;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AddedResponse, CafeListResponse, CafeResponse, NewCafe, ReportClosedParams, SearchParams,
    SuccessMessage, UpdatePriceParams,
};
use crate::state::AppState;

/// GET /random - Pick one cafe uniformly at random
pub async fn random_cafe(State(state): State<AppState>) -> ApiResult<Json<CafeResponse>> {
    let cafes = state.db().list_cafes()?;

    // Guard the empty table instead of panicking on the choice
    let cafe = cafes
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| ApiError::NoMatch("Sorry, there are no cafes available yet".to_string()))?;

    Ok(Json(CafeResponse { cafe }))
}

/// GET /all - List every cafe
pub async fn all_cafes(State(state): State<AppState>) -> ApiResult<Json<CafeListResponse>> {
    let cafes = state.db().list_cafes()?;
    Ok(Json(CafeListResponse { cafe: cafes }))
}

/// GET /search?loc=.. - All cafes at an exact location
pub async fn search_cafes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<CafeResponse>>> {
    let loc = params
        .loc
        .ok_or_else(|| ApiError::BadRequest("Missing required query parameter 'loc'".into()))?;

    let cafes = state.db().find_by_location(&loc)?;
    if cafes.is_empty() {
        return Err(ApiError::NoMatch(
            "Sorry we don't have a cafe at that location".to_string(),
        ));
    }

    Ok(Json(
        cafes.into_iter().map(|cafe| CafeResponse { cafe }).collect(),
    ))
}

/// POST /add - Create a cafe from a form-encoded body
pub async fn add_cafe(
    State(state): State<AppState>,
    Form(req): Form<NewCafe>,
) -> ApiResult<Json<AddedResponse>> {
    req.validate().map_err(ApiError::BadRequest)?;

    let cafe = state.db().insert_cafe(&req)?;
    tracing::info!(id = cafe.id, name = %cafe.name, "Added cafe");

    Ok(Json(AddedResponse {
        response: SuccessMessage {
            success: "Successfully added the new cafe.".to_string(),
        },
    }))
}

/// PUT/GET /update-price/{id}?new_price=.. - Set a cafe's coffee price
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UpdatePriceParams>,
) -> ApiResult<Json<SuccessMessage>> {
    let new_price = params.new_price.ok_or_else(|| {
        ApiError::BadRequest("Missing required query parameter 'new_price'".into())
    })?;

    if !state.db().update_price(id, &new_price)? {
        return Err(ApiError::NotFound(
            "Sorry a cafe with that id wasn't found in the database.".to_string(),
        ));
    }

    Ok(Json(SuccessMessage {
        success: "Successfully updated the price.".to_string(),
    }))
}

/// DELETE/GET /report-closed/{id}?api_key=.. - Remove a closed cafe
pub async fn report_closed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ReportClosedParams>,
) -> ApiResult<Json<SuccessMessage>> {
    // Existence is checked before the key, matching the original contract
    if state.db().get_cafe(id)?.is_none() {
        return Err(ApiError::NotFound(
            "Sorry a cafe with that id was not found in the database".to_string(),
        ));
    }

    let authorized = params
        .api_key
        .as_deref()
        .is_some_and(|key| state.api_key_matches(key));

    if !authorized {
        return Err(ApiError::Forbidden(
            "Sorry, that's not allowed. Make sure you have the correct api-key".to_string(),
        ));
    }

    state.db().delete_cafe(id)?;
    tracing::info!(id, "Deleted cafe reported as closed");

    Ok(Json(SuccessMessage {
        success: "Successfully deleted the cafe.".to_string(),
    }))
}
