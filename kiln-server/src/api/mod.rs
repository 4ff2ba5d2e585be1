//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`albums`] - 相册与媒体排序接口

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod albums;
pub mod health;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Album API
        .merge(albums::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by the HTTP server and by in-process tests
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_router()
        // ========== Tower HTTP Middleware ==========
        // Timeout - requests running longer get 408
        .layer(TimeoutLayer::new(timeout))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
