//! 生JSONアーティファクトの書き出し

use std::path::{Path, PathBuf};

use tracing::info;

use crate::ekadashi::ScrapeOutcome;
use crate::error::ScraperError;

/// 抽出結果を `{output_dir}/ekadashi_{year}_raw.json` に書き出す
///
/// 既存ファイルは無条件に上書きする。書き込み失敗は致命的エラーとして
/// 呼び出し側に伝播する。
pub fn write_raw_json(
    output_dir: &Path,
    year: u16,
    outcome: &ScrapeOutcome,
) -> Result<PathBuf, ScraperError> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join(format!("ekadashi_{}_raw.json", year));
    let json =
        serde_json::to_string_pretty(outcome).map_err(|e| ScraperError::Json(e.to_string()))?;
    std::fs::write(&path, json)?;

    info!("Raw data saved to {}", path.display());
    Ok(path)
}
