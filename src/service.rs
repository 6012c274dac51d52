use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::ekadashi::{DetailScraper, ListRecord, ListScraper, ScrapeOutcome};
use crate::error::ScraperError;
use crate::output;
use crate::traits::Extractor;

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub year: u16,
    pub headless: bool,
    pub debug: bool,
    pub output_dir: Option<PathBuf>,
}

impl ScrapeRequest {
    pub fn new(year: u16) -> Self {
        Self {
            year,
            headless: true,
            debug: false,
            output_dir: None,
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl From<&ScrapeRequest> for ScraperConfig {
    fn from(req: &ScrapeRequest) -> Self {
        let mut config = ScraperConfig::default()
            .with_headless(req.headless)
            .with_debug(req.debug);
        if let Some(dir) = &req.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        config
    }
}

/// スクレイピング結果
#[derive(Debug)]
pub struct ScrapeResult {
    pub outcome: ScrapeOutcome,
    pub json_path: PathBuf,
}

/// 一覧ページが空だったら詳細ページ戦略に切り替えるか
fn fallback_needed(records: &[ListRecord]) -> bool {
    records.is_empty()
}

/// 一覧戦略の失敗が致命的か
///
/// 致命的なのはセッション起動失敗とファイルI/Oのみ。それ以外
/// （ナビゲーション・JS・タイムアウト等）は空の結果と同じ扱いにして
/// 詳細ページ戦略に進む。
fn list_failure_is_fatal(e: &ScraperError) -> bool {
    matches!(e, ScraperError::BrowserInit(_) | ScraperError::FileIO(_))
}

/// tower::Serviceを実装したスクレイパーサービス
///
/// 一覧ページ抽出 → （空なら）詳細ページ抽出 → JSON書き出し、を一括実行する。
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // 将来的な拡張用（レートリミット、キャッシュなど）
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("スクレイピングリクエスト受信: year={}", req.year);

        Box::pin(async move {
            let config: ScraperConfig = (&req).into();
            let output_dir = config.output_dir.clone();

            // 第1戦略: 一覧ページ（失敗しても空扱いでフォールバックに進む）
            let mut list_scraper = ListScraper::new(config.clone(), req.year);
            let list_records = match list_scraper.execute().await {
                Ok(records) => records,
                Err(e) if !list_failure_is_fatal(&e) => {
                    warn!("List extraction failed, treating as empty: {}", e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            // 第2戦略: 一覧が空なら詳細ページを1回だけ巡回
            let outcome = if fallback_needed(&list_records) {
                info!("List page yielded nothing, falling back to detail pages");
                let mut detail_scraper = DetailScraper::new(config, req.year);
                let detail_records = detail_scraper.execute().await?;
                ScrapeOutcome::Detail(detail_records)
            } else {
                ScrapeOutcome::List(list_records)
            };

            let json_path = output::write_raw_json(&output_dir, req.year, &outcome)?;

            info!(
                "スクレイピング完了: strategy={}, records={}, path={}",
                outcome.strategy(),
                outcome.len(),
                json_path.display()
            );

            Ok(ScrapeResult { outcome, json_path })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_request_builder() {
        let req = ScrapeRequest::new(2026)
            .with_headless(false)
            .with_debug(true)
            .with_output_dir("/tmp/out");

        assert_eq!(req.year, 2026);
        assert!(!req.headless);
        assert!(req.debug);
        assert_eq!(req.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_scrape_request_to_config() {
        let req = ScrapeRequest::new(2026).with_output_dir("/tmp/out");
        let config: ScraperConfig = (&req).into();

        assert!(config.headless);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_scrape_request_keeps_default_output_dir() {
        let req = ScrapeRequest::new(2026);
        let config: ScraperConfig = (&req).into();
        assert_eq!(
            config.output_dir,
            PathBuf::from(crate::config::DEFAULT_OUTPUT_DIR)
        );
    }

    #[test]
    fn test_fallback_on_empty_list_only() {
        assert!(fallback_needed(&[]));

        let records = vec![ListRecord {
            name: "Jaya Ekadashi".to_string(),
            date_text: "Jan 15, 2026".to_string(),
            raw: "raw".to_string(),
        }];
        assert!(!fallback_needed(&records));
    }

    #[test]
    fn test_list_failure_fatality() {
        // ナビゲーション・JS・タイムアウトは回復可能（詳細ページに進む）
        assert!(!list_failure_is_fatal(&ScraperError::Navigation(
            "net::ERR_CONNECTION_RESET".into()
        )));
        assert!(!list_failure_is_fatal(&ScraperError::JavaScript(
            "evaluation failed".into()
        )));
        assert!(!list_failure_is_fatal(&ScraperError::Timeout(
            "selector".into()
        )));
        assert!(!list_failure_is_fatal(&ScraperError::Extraction(
            "bad payload".into()
        )));

        // セッション起動失敗だけは致命的
        assert!(list_failure_is_fatal(&ScraperError::BrowserInit(
            "chromium not found".into()
        )));
    }

    #[tokio::test]
    #[ignore] // 実環境テスト用: cargo test test_live_scrape -- --ignored --nocapture
    async fn test_live_scrape() {
        tracing_subscriber::fmt()
            .with_env_filter("info,panchang_scraper=debug")
            .init();

        let output_dir = std::env::temp_dir().join("panchang-live-test");
        let request = ScrapeRequest::new(2026).with_output_dir(&output_dir);

        let mut service = ScraperService::new();
        let result = service.call(request).await.expect("Scrape failed");

        println!("\n=== Scrape Result ===");
        println!("Strategy: {}", result.outcome.strategy());
        println!("Records: {}", result.outcome.len());
        println!("Artifact: {}", result.json_path.display());

        let content = std::fs::read_to_string(&result.json_path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), result.outcome.len());
    }
}
