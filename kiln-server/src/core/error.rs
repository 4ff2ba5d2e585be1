use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// 服务器启动与运行错误
///
/// 请求级别的错误使用 [`shared::AppError`]，这里只覆盖启动阶段
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("无法读取种子文件 {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("种子文件格式错误 {path}: {source}")]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("种子数据无效: {0}")]
    SeedInvalid(String),

    #[error("端口绑定失败 {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
