//! ブラウザセッションのセットアップと待機ヘルパー
//!
//! 一覧スクレイパーと詳細スクレイパーで共有する。

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;

/// readyState ポーリングのインターバル（ミリ秒）
const READY_CHECK_INTERVAL_MS: u64 = 500;

/// ヘッドレスChromiumを起動してハンドラータスクを立ち上げる
pub async fn launch(config: &ScraperConfig) -> Result<Browser, ScraperError> {
    info!("Initializing browser session...");

    // ユニークなユーザーデータディレクトリを生成
    let unique_id = format!(
        "{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    let user_data_dir = std::env::temp_dir().join(format!("panchang-{}", unique_id));

    // Chromium パスを取得（設定 > 環境変数 > デフォルト）
    let chrome_path = match &config.chrome_path {
        Some(path) => path.display().to_string(),
        None => std::env::var("CHROME_PATH")
            .or_else(|_| std::env::var("CHROMIUM_PATH"))
            .unwrap_or_else(|_| "chromium".to_string()),
    };

    // ブラウザ設定を構築
    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .user_data_dir(&user_data_dir)
        .window_size(config.window_width, config.window_height);

    if !config.headless {
        builder = builder.with_head();
    }

    builder = builder
        .no_sandbox()
        .request_timeout(config.nav_timeout)
        .arg(format!("--user-agent={}", config.user_agent))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-gpu");

    if config.debug {
        builder = builder.arg("--enable-logging=stderr").arg("--v=1");
    }

    let browser_config = builder
        .build()
        .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

    // ブラウザを起動
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

    // ハンドラータスクを起動
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            debug!("Browser event: {:?}", event);
        }
    });

    info!("Browser session initialized");
    Ok(browser)
}

/// document.readyState が complete になるまで待機
///
/// 旧実装の固定スリープの置き換え。タイムアウトしても続行する
/// （ページが部分的にでも読めれば抽出は試みる）。
pub async fn wait_ready_state(page: &Page, timeout: Duration) -> Result<(), ScraperError> {
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        let ready_state = page
            .evaluate("document.readyState")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        let state = ready_state.into_value::<String>().unwrap_or_default();
        if state == "complete" {
            debug!("Page load complete after {:?}", start.elapsed());
            return Ok(());
        }

        sleep(Duration::from_millis(READY_CHECK_INTERVAL_MS)).await;
    }

    warn!(
        "Ready state timeout after {:?}, proceeding anyway",
        start.elapsed()
    );
    Ok(())
}

/// セレクタ存在チェック用のJSを組み立てる
///
/// セレクタはシングルクォート文字列に埋め込むため、引用符と
/// バックスラッシュをエスケープする。
fn selector_probe_script(selector: &str) -> String {
    let escaped = selector.replace('\\', "\\\\").replace('\'', "\\'");
    format!("document.querySelector('{}') !== null", escaped)
}

/// セレクタにマッチする要素が出現するまで待機
///
/// タイムアウト時は Timeout を返し、呼び出し側がフォールバックを
/// 選べるようにする。
pub async fn wait_for_selector(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<(), ScraperError> {
    let start = std::time::Instant::now();
    let script = selector_probe_script(selector);

    while start.elapsed() < timeout {
        let found = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        if found.into_value::<bool>().unwrap_or(false) {
            debug!("Selector '{}' found after {:?}", selector, start.elapsed());
            return Ok(());
        }

        sleep(Duration::from_millis(READY_CHECK_INTERVAL_MS)).await;
    }

    Err(ScraperError::Timeout(format!(
        "セレクタ '{}' が {:?} 以内に出現しませんでした",
        selector, timeout
    )))
}

/// ページ本文のテキストを取得
pub async fn body_text(page: &Page) -> Result<String, ScraperError> {
    let result = page
        .evaluate("document.body ? document.body.innerText : ''")
        .await
        .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

    Ok(result.into_value::<String>().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_probe_script_plain() {
        assert_eq!(
            selector_probe_script(".dpTableNormal, .dpTable, table"),
            "document.querySelector('.dpTableNormal, .dpTable, table') !== null"
        );
    }

    #[test]
    fn test_selector_probe_script_escapes_quotes() {
        assert_eq!(
            selector_probe_script("a[title='Ekadashi']"),
            r"document.querySelector('a[title=\'Ekadashi\']') !== null"
        );
    }

    #[test]
    fn test_selector_probe_script_escapes_backslash() {
        assert_eq!(
            selector_probe_script(r"div.a\:b"),
            r"document.querySelector('div.a\\:b') !== null"
        );
    }
}
