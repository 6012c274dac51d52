//! Ekadashi スクレイパーライブラリ
//!
//! - Drik Panchang から指定年のEkadashi（ヒンドゥー太陰暦の断食日）日付を取得
//! - 一覧ページ抽出に失敗した場合は24件の詳細ページ巡回にフォールバック
//! - 結果を生JSONとして書き出し（下流パイプライン用）
//!
//! # サービス使用例
//!
//! ```rust,ignore
//! use panchang_scraper::{ScrapeRequest, ScraperService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let request = ScrapeRequest::new(2026)
//!         .with_headless(false)
//!         .with_output_dir("./data");
//!
//!     let result = service.call(request).await.unwrap();
//!     println!("JSON saved: {:?}", result.json_path);
//! }
//! ```
//!
//! # 抽出器を直接使う例
//!
//! ```rust,ignore
//! use panchang_scraper::{Extractor, ListScraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::default();
//!     let mut scraper = ListScraper::new(config, 2026);
//!     let records = scraper.execute().await.unwrap();
//!     println!("Records: {}", records.len());
//! }
//! ```

pub mod config;
pub mod ekadashi;
pub mod error;
pub mod output;
pub mod service;
pub mod session;
pub mod traits;

// 主要な型をリエクスポート
pub use config::ScraperConfig;
pub use ekadashi::{
    DetailRecord, DetailScraper, ListRecord, ListScraper, ScrapeOutcome, SlugFailure,
    EKADASHI_SLUGS,
};
pub use error::ScraperError;
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use traits::Extractor;
