use kiln_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (不存在时忽略)
    dotenv::dotenv().ok();

    // 2. 加载配置并初始化日志
    let config = Config::from_env();
    setup_environment(&config)?;

    print_banner();
    tracing::info!(environment = %config.environment, "Kiln album server starting...");

    // 3. 初始化服务器状态 (加载种子文件)
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
