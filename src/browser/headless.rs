use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{AppResult, BrowserError};

/// 一次审计使用的 Chrome 实例
///
/// lighthouse 通过远程调试端口连接到这个实例
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    port: u16,
}

impl ChromeSession {
    /// 远程调试端口
    pub fn port(&self) -> u16 {
        self.port
    }

    /// 关闭浏览器并等待进程退出
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("⚠️ 关闭浏览器失败，强制结束: {}", e);
            if let Some(Err(e)) = self.browser.kill().await {
                error!("结束浏览器进程失败: {}", e);
            }
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器退出失败: {}", e);
        }
        self.handler.abort();
        debug!("浏览器已关闭 (端口 {})", self.port);
    }
}

/// 启动 Chrome
///
/// `flags` 为完整的命令行参数（带 `--`）。是否无头由其中的
/// `--headless` / `--headless=new` 决定，其余参数原样传给 Chrome。
pub async fn launch_chrome(flags: &[String], executable: Option<&str>) -> AppResult<ChromeSession> {
    debug!("🚀 启动 Chrome, 参数: {:?}", flags);

    let mut builder = BrowserConfig::builder();
    builder = match headless_mode(flags) {
        HeadlessFlag::New => builder.new_headless_mode(),
        HeadlessFlag::Legacy => builder,
        HeadlessFlag::Off => builder.with_head(),
    };
    if let Some(path) = executable {
        builder = builder.chrome_executable(Path::new(path));
    }
    let extra: Vec<&str> = flags
        .iter()
        .map(String::as_str)
        .filter(|f| !f.starts_with("--headless") && !f.starts_with("--remote-debugging-port"))
        .collect();
    let config = builder
        .args(extra)
        .build()
        .map_err(|message| BrowserError::ConfigurationFailed { message })?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|source| BrowserError::LaunchFailed { source })?;

    // 在后台处理浏览器事件
    let handler = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    let port = debug_port_from_ws(browser.websocket_address()).ok_or_else(|| {
        BrowserError::ConfigurationFailed {
            message: format!("无法解析调试地址: {}", browser.websocket_address()),
        }
    })?;
    info!("✓ Chrome 已启动, 调试端口 {}", port);

    Ok(ChromeSession {
        browser,
        handler,
        port,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadlessFlag {
    New,
    Legacy,
    Off,
}

fn headless_mode(flags: &[String]) -> HeadlessFlag {
    match flags.iter().find(|f| f.starts_with("--headless")) {
        Some(flag) if flag == "--headless=new" => HeadlessFlag::New,
        Some(_) => HeadlessFlag::Legacy,
        None => HeadlessFlag::Off,
    }
}

/// 从 `ws://127.0.0.1:9222/devtools/browser/<id>` 中取出端口
fn debug_port_from_ws(ws_url: &str) -> Option<u16> {
    let rest = ws_url.split("://").nth(1)?;
    let host_port = rest.split('/').next()?;
    host_port.rsplit(':').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_port_from_ws() {
        assert_eq!(
            debug_port_from_ws("ws://127.0.0.1:9222/devtools/browser/abc-123"),
            Some(9222)
        );
        assert_eq!(debug_port_from_ws("ws://localhost/devtools"), None);
        assert_eq!(debug_port_from_ws("not a url"), None);
    }

    #[test]
    fn test_headless_mode() {
        assert_eq!(headless_mode(&["--headless".to_string()]), HeadlessFlag::Legacy);
        assert_eq!(headless_mode(&["--headless=new".to_string()]), HeadlessFlag::New);
        assert_eq!(headless_mode(&["--no-sandbox".to_string()]), HeadlessFlag::Off);
    }

    #[tokio::test]
    #[ignore] // 需要本机安装 Chrome：cargo test -- --ignored
    async fn test_launch_and_shutdown_chrome() {
        let session = launch_chrome(&["--headless".to_string()], None)
            .await
            .expect("启动 Chrome 失败");
        assert!(session.port() > 0);
        session.shutdown().await;
    }
}
