use crate::dto::score_dto::{LeaderboardQuery, SubmitScoreReq};
use crate::error::api_error::ApiError;
use crate::error::request_error::{ValidatedQuery, ValidatedRequest};
use crate::middleware::auth::CurrentUser;
use crate::model::user::{LeaderboardEntry, UserStats};
use crate::response::api_response::ApiSuccessResponse;
use crate::service::score_service::{ScoreSubmission, UserScore};
use crate::state::score_state::ScoreState;
use axum::{extract::State, Extension, Json};
use axum_macros::debug_handler;

// 提交成绩并发放徽章
#[debug_handler]
pub async fn submit_score(
    State(state): State<ScoreState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedRequest(payload): ValidatedRequest<SubmitScoreReq>,
) -> Result<Json<ApiSuccessResponse<ScoreSubmission>>, ApiError> {
    let submission = state
        .score_service
        .submit_score_and_evaluate(user.id, payload.into())
        .await?;
    Ok(Json(ApiSuccessResponse::send(submission)))
}

pub async fn my_score(
    State(state): State<ScoreState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiSuccessResponse<UserScore>>, ApiError> {
    let score = state.score_service.get_user_score(user.id).await?;
    Ok(Json(ApiSuccessResponse::send(score)))
}

pub async fn leaderboard(
    State(state): State<ScoreState>,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> Result<Json<ApiSuccessResponse<Vec<LeaderboardEntry>>>, ApiError> {
    let entries = state.score_service.get_leaderboard(query.limit()).await?;
    Ok(Json(ApiSuccessResponse::send(entries)))
}

pub async fn my_stats(
    State(state): State<ScoreState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiSuccessResponse<UserStats>>, ApiError> {
    let stats = state.score_service.get_user_stats(user.id).await?;
    Ok(Json(ApiSuccessResponse::send(stats)))
}
