//! 一覧ページ抽出（第1戦略）
//!
//! 年間一覧ページのテーブルを走査し、名前に "ekadashi" を含む行を
//! ListRecord にする。テーブルが見つからない場合は本文ダンプを
//! 診断出力して空の結果を返す（呼び出し側が詳細ページ戦略に
//! フォールバックする）。

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::session;
use crate::traits::Extractor;

use super::types::{truncate_chars, ListRecord};

/// テーブル候補セレクタ（優先順）
const TABLE_SELECTORS: &str = ".dpTableNormal, .dpTable, table";

/// 診断ダンプで出す本文の最大文字数
const DIAGNOSTIC_CHARS: usize = 2000;

/// JSで取り出した生の行データ
#[derive(Debug, Deserialize)]
struct RawRow {
    cells: Vec<String>,
    text: String,
}

pub struct ListScraper {
    config: ScraperConfig,
    year: u16,
    browser: Option<Browser>,
}

impl ListScraper {
    pub fn new(config: ScraperConfig, year: u16) -> Self {
        Self {
            config,
            year,
            browser: None,
        }
    }

    fn list_url(&self) -> String {
        format!(
            "{}/vrat/ekadashi/ekadashi-vrat-list.html?year={}",
            self.config.base_url, self.year
        )
    }

    /// テーブル不在時の診断出力
    ///
    /// 本文先頭を出力し、デバッグモードならダンプファイルと
    /// スクリーンショットも残す。
    async fn dump_diagnostics(&self, page: &Page) {
        let text = match session::body_text(page).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read body text for diagnostics: {}", e);
                return;
            }
        };

        info!(
            "Page text (first {} chars): {}",
            DIAGNOSTIC_CHARS,
            truncate_chars(&text, DIAGNOSTIC_CHARS)
        );

        if !self.config.debug {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("./debug/list_page_{}_{}.txt", self.year, timestamp);
        if let Err(e) = std::fs::create_dir_all("./debug") {
            warn!("Failed to create debug directory: {}", e);
        } else if let Err(e) = std::fs::write(&filename, &text) {
            warn!("Failed to save body dump: {}", e);
        } else {
            info!("Saved body dump to {}", filename);
        }

        if let Ok(screenshot) = page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
            debug!("List page screenshot: data:image/png;base64,{}", encoded);
        }
    }

    /// ナビゲーションからテーブル抽出までを実行
    ///
    /// ここで返すエラーはすべて回復可能として扱われる（extractが
    /// 診断を出して空の結果に落とす）。
    async fn collect_from_page(
        &self,
        page: &Page,
        url: &str,
    ) -> Result<Vec<ListRecord>, ScraperError> {
        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        session::wait_ready_state(page, self.config.list_ready_timeout).await?;
        session::wait_for_selector(page, TABLE_SELECTORS, self.config.list_ready_timeout).await?;

        let rows = self.fetch_rows(page).await?;
        info!("List page yielded {} table rows", rows.len());
        Ok(collect_records(rows))
    }

    /// テーブル行を生データとして取り出す
    async fn fetch_rows(&self, page: &Page) -> Result<Vec<RawRow>, ScraperError> {
        let script = format!(
            r#"
            (() => {{
                const container = document.querySelector('{}');
                if (!container) return JSON.stringify([]);
                const rows = [];
                container.querySelectorAll('tr').forEach((tr) => {{
                    const cells = Array.from(tr.querySelectorAll('td'))
                        .map((td) => td.innerText.trim());
                    rows.push({{ cells: cells, text: tr.innerText.trim() }});
                }});
                return JSON.stringify(rows);
            }})()
        "#,
            TABLE_SELECTORS
        );

        let result = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        let json_str = result.into_value::<String>().unwrap_or_default();
        parse_rows(&json_str)
    }
}

/// JSから返った行ペイロードをデコード
fn parse_rows(json_str: &str) -> Result<Vec<RawRow>, ScraperError> {
    serde_json::from_str(json_str).map_err(|e| ScraperError::Extraction(e.to_string()))
}

/// 行データをListRecordに変換
///
/// セルが2未満の行はスキップ。セル0に "ekadashi" を含む行だけ残す
/// （大文字小文字は区別しない）。
fn collect_records(rows: Vec<RawRow>) -> Vec<ListRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        if row.cells.len() < 2 {
            skipped += 1;
            continue;
        }

        let name = row.cells[0].trim().to_string();
        if !name.to_lowercase().contains("ekadashi") {
            continue;
        }

        records.push(ListRecord {
            name,
            date_text: row.cells[1].trim().to_string(),
            raw: row.text,
        });
    }

    if skipped > 0 {
        debug!("Skipped {} rows with fewer than 2 cells", skipped);
    }

    records
}

#[async_trait]
impl Extractor for ListScraper {
    type Output = Vec<ListRecord>;

    async fn initialize(&mut self) -> Result<(), ScraperError> {
        let browser = session::launch(&self.config).await?;
        self.browser = Some(browser);
        Ok(())
    }

    async fn extract(&mut self) -> Result<Vec<ListRecord>, ScraperError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))?;

        let url = self.list_url();
        info!("Fetching Ekadashi list page: {}", url);

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ナビゲーション以降の失敗はすべて回復可能として扱い、
        // 診断を出して空で返す（詳細ページ戦略へのフォールバックは
        // 呼び出し側が行う）。致命的なのはセッション起動失敗のみ。
        let records = match self.collect_from_page(&page, &url).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Table method failed: {}", e);
                self.dump_diagnostics(&page).await;
                Vec::new()
            }
        };

        info!("Extracted {} Ekadashi list records", records.len());

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        Ok(records)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.browser = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str], text: &str) -> RawRow {
        RawRow {
            cells: cells.iter().map(|c| c.to_string()).collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_collect_records_filters_on_name() {
        let rows = vec![
            row(
                &["Jaya Ekadashi", "Jan 15, 2026"],
                "Jaya Ekadashi Jan 15, 2026",
            ),
            row(
                &["Somewhat Day", "Jan 16, 2026"],
                "Somewhat Day Jan 16, 2026",
            ),
        ];

        let records = collect_records(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jaya Ekadashi");
        assert_eq!(records[0].date_text, "Jan 15, 2026");
        assert_eq!(records[0].raw, "Jaya Ekadashi Jan 15, 2026");
    }

    #[test]
    fn test_collect_records_case_insensitive() {
        let rows = vec![row(&["NIRJALA EKADASHI", "June 2, 2026"], "raw")];
        let records = collect_records(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "NIRJALA EKADASHI");
    }

    #[test]
    fn test_collect_records_skips_short_rows() {
        let rows = vec![
            row(&["Ekadashi heading"], "Ekadashi heading"),
            row(&[], ""),
            row(&["Saphala Ekadashi", "December 30, 2026"], "raw"),
        ];

        let records = collect_records(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Saphala Ekadashi");
    }

    #[test]
    fn test_collect_records_trims_cell_text() {
        let rows = vec![row(&["  Apara Ekadashi  ", "  May 12, 2026  "], "raw")];
        let records = collect_records(rows);
        assert_eq!(records[0].name, "Apara Ekadashi");
        assert_eq!(records[0].date_text, "May 12, 2026");
    }

    #[test]
    fn test_collect_records_keeps_duplicates() {
        // 一覧テーブルが行を繰り返す場合、重複排除はしない
        let rows = vec![
            row(&["Jaya Ekadashi", "Jan 15, 2026"], "raw"),
            row(&["Jaya Ekadashi", "Jan 15, 2026"], "raw"),
        ];
        assert_eq!(collect_records(rows).len(), 2);
    }

    #[test]
    fn test_parse_rows_valid_payload() {
        let json = r#"[{"cells": ["Jaya Ekadashi", "Jan 15, 2026"], "text": "raw"}]"#;
        let rows = parse_rows(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], "Jaya Ekadashi");
    }

    #[test]
    fn test_parse_rows_malformed_payload_is_extraction_error() {
        let err = parse_rows("not json").unwrap_err();
        assert!(matches!(err, ScraperError::Extraction(_)));
    }

    #[test]
    fn test_list_url_interpolates_year() {
        let scraper = ListScraper::new(ScraperConfig::default(), 2026);
        assert_eq!(
            scraper.list_url(),
            "https://www.drikpanchang.com/vrat/ekadashi/ekadashi-vrat-list.html?year=2026"
        );
    }
}
