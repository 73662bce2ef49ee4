use crate::dto::shop_dto::{CanPurchaseRes, PurchaseRes, ShopItemReq};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::middleware::auth::CurrentUser;
use crate::model::shop::ShopItem;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::shop_state::ShopState;
use axum::{extract::State, Extension, Json};
use axum_macros::debug_handler;

pub async fn items(
    State(state): State<ShopState>,
) -> Result<Json<ApiSuccessResponse<Vec<ShopItem>>>, ApiError> {
    let items = state.shop_service.get_items().await?;
    Ok(Json(ApiSuccessResponse::send(items)))
}

pub async fn can_purchase(
    State(state): State<ShopState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedRequest(payload): ValidatedRequest<ShopItemReq>,
) -> Result<Json<ApiSuccessResponse<CanPurchaseRes>>, ApiError> {
    let res = state
        .shop_service
        .can_purchase(user.id, payload.item_id)
        .await?;
    Ok(Json(ApiSuccessResponse::send(res)))
}

#[debug_handler]
pub async fn purchase(
    State(state): State<ShopState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedRequest(payload): ValidatedRequest<ShopItemReq>,
) -> Result<Json<ApiSuccessResponse<PurchaseRes>>, ApiError> {
    let res = state.shop_service.purchase(user.id, payload.item_id).await?;
    Ok(Json(ApiSuccessResponse::send(res)))
}
