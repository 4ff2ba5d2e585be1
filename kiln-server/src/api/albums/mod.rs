//! Album API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/albums", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/media", get(handler::list_media))
        // 整体替换排序，校验失败不做任何修改
        .route("/{id}/media/sort-order", put(handler::update_sort_order))
}
