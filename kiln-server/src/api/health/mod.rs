//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/health | GET | 简单健康检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "albums": 3,
//!   "uptime_seconds": 120
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// 简单健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    pub status: String,
    /// 版本号
    pub version: String,
    /// 已加载的相册数
    pub albums: usize,
    /// 运行时间 (秒)
    pub uptime_seconds: u64,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        albums: state.albums.len(),
        uptime_seconds: state.uptime_seconds(),
    })
}
