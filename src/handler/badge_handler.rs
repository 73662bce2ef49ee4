use crate::dto::badge_dto::BadgeRes;
use crate::error::api_error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::model::badge::OwnedBadge;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::badge_state::BadgeState;
use axum::{extract::State, Extension, Json};

pub async fn my_badges(
    State(state): State<BadgeState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiSuccessResponse<Vec<OwnedBadge>>>, ApiError> {
    let badges = state.badge_service.list_user_badges(user.id).await?;
    Ok(Json(ApiSuccessResponse::send(badges)))
}

pub async fn all_badges(
    State(state): State<BadgeState>,
) -> Result<Json<ApiSuccessResponse<Vec<BadgeRes>>>, ApiError> {
    let badges = state.badge_service.list_all_badges().await?;
    Ok(Json(ApiSuccessResponse::send(badges)))
}
