//! 詳細ページ抽出（フォールバック戦略）
//!
//! 既知の24スラッグを順に巡回し、本文から "Month DD, YYYY" 形式の
//! 日付を正規表現で拾う。スラッグ単位の失敗はスキップして続行し、
//! 最後にサマリを出す。

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::session;
use crate::traits::Extractor;

use super::types::{truncate_chars, DetailRecord, SlugFailure};

/// 既知のEkadashiスラッグ（暦順、24件）
pub const EKADASHI_SLUGS: [&str; 24] = [
    "pausha-putrada",
    "sat-tila",
    "jaya",
    "vijaya",
    "amalaki",
    "papmochani",
    "kamada",
    "varuthini",
    "mohini",
    "apara",
    "nirjala",
    "yogini",
    "devshayani",
    "kamika",
    "shravana-putrada",
    "aja",
    "parsva",
    "indira",
    "papankusha",
    "rama",
    "devutthana",
    "utpanna",
    "mokshada",
    "saphala",
];

/// 1スラッグあたりの日付マッチ上限
const MAX_DATES_PER_SLUG: usize = 3;

/// スニペットの最大文字数
const SNIPPET_CHARS: usize = 500;

/// "January 15, 2026" / "January 15 2026" にマッチ（英語月名のみ）
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}",
    )
    .expect("date pattern must compile")
});

pub struct DetailScraper {
    config: ScraperConfig,
    year: u16,
    browser: Option<Browser>,
    failures: Vec<SlugFailure>,
}

impl DetailScraper {
    pub fn new(config: ScraperConfig, year: u16) -> Self {
        Self {
            config,
            year,
            browser: None,
            failures: Vec::new(),
        }
    }

    /// 直近のextractで失敗したスラッグの一覧
    pub fn failures(&self) -> &[SlugFailure] {
        &self.failures
    }

    fn detail_url(&self, slug: &str) -> String {
        format!(
            "{}/vrat/ekadashi/{}-ekadashi-vrat-date.html?year={}",
            self.config.base_url, slug, self.year
        )
    }

    /// 1スラッグ分の取得と抽出
    async fn fetch_slug(&self, slug: &str) -> Result<DetailRecord, ScraperError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))?;

        let url = self.detail_url(slug);
        info!("Fetching {}...", slug);

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        let result = async {
            page.goto(url.as_str())
                .await
                .map_err(|e| ScraperError::Navigation(e.to_string()))?;

            session::wait_ready_state(&page, self.config.detail_ready_timeout).await?;

            let text = session::body_text(&page).await?;
            let dates_found = extract_dates(&text);
            debug!("{}: {} date matches", slug, dates_found.len());

            Ok(DetailRecord {
                name: slug_to_name(slug),
                url: url.clone(),
                dates_found,
                page_snippet: truncate_chars(&text, SNIPPET_CHARS),
            })
        }
        .await;

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {}: {}", slug, e);
        }

        result
    }
}

/// 本文から日付文字列を抽出（最大3件、マッチ全体を記録する）
fn extract_dates(text: &str) -> Vec<String> {
    DATE_PATTERN
        .find_iter(text)
        .take(MAX_DATES_PER_SLUG)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// スラッグを表示名に変換（例: "pausha-putrada" → "Pausha Putrada Ekadashi"）
fn slug_to_name(slug: &str) -> String {
    let title = slug
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} Ekadashi", title)
}

#[async_trait]
impl Extractor for DetailScraper {
    type Output = Vec<DetailRecord>;

    async fn initialize(&mut self) -> Result<(), ScraperError> {
        let browser = session::launch(&self.config).await?;
        self.browser = Some(browser);
        Ok(())
    }

    async fn extract(&mut self) -> Result<Vec<DetailRecord>, ScraperError> {
        info!(
            "Visiting {} Ekadashi detail pages for {}",
            EKADASHI_SLUGS.len(),
            self.year
        );

        self.failures.clear();
        let mut records = Vec::new();

        for slug in EKADASHI_SLUGS {
            match self.fetch_slug(slug).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Error fetching {}: {}", slug, e);
                    self.failures.push(SlugFailure {
                        slug: slug.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if self.failures.is_empty() {
            info!("All {} detail pages fetched", records.len());
        } else {
            let failed: Vec<&str> = self.failures.iter().map(|f| f.slug.as_str()).collect();
            warn!(
                "{}/{} detail pages failed: {}",
                self.failures.len(),
                EKADASHI_SLUGS.len(),
                failed.join(", ")
            );
        }

        Ok(records)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.browser = None;
        Ok(())
    }
}
