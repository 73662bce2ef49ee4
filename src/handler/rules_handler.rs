use crate::error::{api_error::ApiError, game_error::GameError};
use crate::response::api_response::ApiSuccessResponse;
use crate::state::rules_state::RulesState;
use axum::{extract::State, Json};
use std::io::ErrorKind;

// 游戏规则说明, 每次请求读文件, 改完即生效
pub async fn get_rules(
    State(state): State<RulesState>,
) -> Result<Json<ApiSuccessResponse<serde_json::Value>>, ApiError> {
    let content = tokio::fs::read_to_string(state.rules_file.as_path())
        .await
        .map_err(|err| {
            tracing::error!("read rules file {:?} failed: {}", state.rules_file, err.to_string());
            match err.kind() {
                ErrorKind::NotFound => GameError::NotFound("rules document".to_string()),
                _ => GameError::Internal(err.to_string()),
            }
        })?;
    let rules: serde_json::Value = serde_json::from_str(&content).map_err(|err| {
        tracing::error!("parse rules file failed: {}", err.to_string());
        GameError::Internal(err.to_string())
    })?;
    Ok(Json(ApiSuccessResponse::send(rules)))
}
