//! Album API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::models::{Album, AlbumSummary, BatchUpdateResponse, MediaItem, MediaOrderEntry};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/albums - 获取所有相册
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<AlbumSummary>>> {
    Ok(ApiResponse::success(state.albums.list_albums()))
}

/// GET /api/albums/:id - 获取单个相册
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Album>> {
    let album = state.albums.get_album(id)?;
    Ok(ApiResponse::success(album))
}

/// GET /api/albums/:id/media - 按排序获取相册媒体
pub async fn list_media(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<MediaItem>>> {
    let media = state.albums.list_media(id)?;
    Ok(ApiResponse::success(media))
}

/// PUT /api/albums/:id/media/sort-order - 批量更新媒体排序
pub async fn update_sort_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<Vec<MediaOrderEntry>>, JsonRejection>,
) -> AppResult<ApiResponse<BatchUpdateResponse>> {
    // 请求体无法解析时也返回统一错误格式
    let Json(entries) = payload.map_err(|rejection| {
        tracing::warn!(album_id = id, error = %rejection.body_text(), "Malformed sort order payload");
        AppError::invalid_format(rejection.body_text()).with_detail("album_id", id)
    })?;
    tracing::info!(
        album_id = id,
        count = entries.len(),
        "Batch update media sort order request received"
    );

    let updated = state.albums.apply_sort_order(id, &entries).inspect_err(|e| {
        tracing::warn!(album_id = id, code = %e.code, message = %e.message, "Sort order rejected");
    })?;

    Ok(ApiResponse::success(BatchUpdateResponse { updated }))
}
