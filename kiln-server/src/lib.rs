//! Kiln Album Server - 相册媒体排序服务
//!
//! # 架构概述
//!
//! 管理后台在本地乐观地调整媒体顺序，随后把完整顺序提交到这里。
//! 服务端是排序的唯一权威：整体校验后写入，否则拒绝且不做任何修改。
//!
//! # 模块结构
//!
//! ```text
//! kiln-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # 内存相册存储与种子文件
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod core;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use crate::core::{Config, Server, ServerError, ServerState, serve};
pub use store::AlbumStore;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// 按配置初始化日志
///
/// 生产环境同时写入 `{work_dir}/logs`
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    let log_dir = config.log_dir();
    let log_dir = config.is_production().then_some(log_dir.as_path());
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        log_dir,
        config.log_retention_days,
    )
}

pub fn print_banner() {
    println!(
        r#"
    __ __ _ __
   / //_/(_) /___
  / ,<  / / / __ \
 / /| |/ / / / / /
/_/ |_/_/_/_/ /_/
    "#
    );
}
