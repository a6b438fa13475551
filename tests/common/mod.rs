//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use message_dispatcher::config::DispatcherConfig;
use message_dispatcher::lifecycle::startup;
use message_dispatcher::{HttpServer, Scope, Shutdown};
use tokio::net::TcpListener;

/// WSDL document with a relative service location.
pub const ECHO_WSDL: &str = r#"<definitions name="echo"><service><port><soap:address location="/services/echo"/></port></service></definitions>"#;

/// Write `ECHO_WSDL` to `dir/echo.wsdl` and return a config publishing it.
pub fn echo_config(dir: &Path) -> DispatcherConfig {
    std::fs::write(dir.join("echo.wsdl"), ECHO_WSDL).unwrap();

    let mut config = DispatcherConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.wsdl.push(message_dispatcher::config::WsdlConfig {
        name: "echo".into(),
        path: "echo.wsdl".into(),
    });
    config
}

/// Bootstrap the dispatcher and serve it on an ephemeral local port.
pub async fn start_dispatcher(config: DispatcherConfig, base_dir: &Path, overrides: Scope) -> (SocketAddr, Shutdown) {
    let controller = startup::bootstrap_with_overrides(&config, base_dir, overrides).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, controller);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// HTTP client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
