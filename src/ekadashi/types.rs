//! Ekadashi 関連の型定義

use serde::{Deserialize, Serialize};

/// 一覧ページのテーブル行から作るレコード
///
/// name はセル0のテキストそのまま（トリムのみ）。重複排除はしない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRecord {
    pub name: String,
    pub date_text: String,
    /// 行全体のテキスト（バックアップ用）
    pub raw: String,
}

/// 詳細ページ1件分のレコード
///
/// 抽出に成功しなくても1スラッグにつき1件作る（dates_foundが空になる）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// スラッグをタイトルケース化した名前（例: "Jaya Ekadashi"）
    pub name: String,
    pub url: String,
    /// ページ本文から正規表現でマッチした日付（最大3件）
    pub dates_found: Vec<String>,
    /// ページ本文の先頭500文字
    pub page_snippet: String,
}

/// スラッグ単位の失敗記録
///
/// 旧実装はログに流して捨てていた。スキップ自体は維持しつつ、
/// サマリとして集計できるよう型にする。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugFailure {
    pub slug: String,
    pub reason: String,
}

/// どちらの戦略で取れたかを保持する抽出結果
///
/// JSON出力はどちらの場合もプレーンな配列（混在しない）。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    List(Vec<ListRecord>),
    Detail(Vec<DetailRecord>),
}

impl ScrapeOutcome {
    pub fn len(&self) -> usize {
        match self {
            Self::List(records) => records.len(),
            Self::Detail(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 戦略名（ログ・表示用）
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Detail(_) => "detail",
        }
    }
}

/// 文字数ベースで先頭を切り出す
///
/// バイト境界ではなく文字境界で切る（Devanagari併記ページ対策）。
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
