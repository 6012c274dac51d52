//! Ekadashi スクレイパーモジュール
//!
//! Drik Panchang から指定年のEkadashi日付を取得する。
//! 一覧ページ抽出と、24件の詳細ページ巡回の2戦略を持つ。

mod detail;
mod list;
mod types;

pub use detail::{DetailScraper, EKADASHI_SLUGS};
pub use list::ListScraper;
pub use types::{DetailRecord, ListRecord, ScrapeOutcome, SlugFailure};
