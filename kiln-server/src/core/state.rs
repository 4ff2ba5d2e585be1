use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, Result};
use crate::store::AlbumStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | albums | Arc<AlbumStore> | 相册与媒体排序存储 |
/// | started_at | Instant | 启动时间 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub albums: Arc<AlbumStore>,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, albums: AlbumStore) -> Self {
        Self {
            config: Arc::new(config),
            albums: Arc::new(albums),
            started_at: Instant::now(),
        }
    }

    /// 根据配置初始化状态
    ///
    /// 设置了 `SEED_FILE` 时从种子文件加载相册，否则以空存储启动
    pub fn initialize(config: &Config) -> Result<Self> {
        let albums = match &config.seed_file {
            Some(path) => {
                let store = AlbumStore::load_seed_file(Path::new(path))?;
                tracing::info!(path = %path, albums = store.len(), "Seed file loaded");
                store
            }
            None => {
                tracing::warn!("SEED_FILE not set, starting with an empty album store");
                AlbumStore::new()
            }
        };
        Ok(Self::new(config.clone(), albums))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
