//! CLIエントリポイント
//!
//! ```text
//! panchang-scraper [YEAR] [--no-headless] [--debug] [--output-dir DIR]
//! ```

use std::path::PathBuf;

use clap::Parser;
use tower::Service;
use tracing_subscriber::EnvFilter;

use panchang_scraper::{ScrapeOutcome, ScrapeRequest, ScraperService};

#[derive(Parser, Debug)]
#[command(name = "panchang-scraper", about = "Drik Panchang Ekadashiスクレイパー")]
struct Args {
    /// 対象年
    #[arg(default_value_t = 2026)]
    year: u16,

    /// ブラウザを表示する（デバッグ用）
    #[arg(long)]
    no_headless: bool,

    /// デバッグモード（本文ダンプ・スクリーンショット保存）
    #[arg(long)]
    debug: bool,

    /// JSON出力先ディレクトリ（デフォルト: /var/www/hindicalendar/data）
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ログ設定
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Scraping Ekadashi dates for {} ===", args.year);
    println!();

    let mut request = ScrapeRequest::new(args.year)
        .with_headless(!args.no_headless)
        .with_debug(args.debug);
    if let Some(dir) = args.output_dir {
        request = request.with_output_dir(dir);
    }

    let mut service = ScraperService::new();
    let result = service.call(request).await?;

    match &result.outcome {
        ScrapeOutcome::List(records) => {
            println!("Found {} Ekadashi entries:", records.len());
            for record in records {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
        ScrapeOutcome::Detail(records) => {
            println!("Results from individual pages:");
            for record in records {
                println!();
                println!("{}:", record.name);
                println!("  Dates found: {:?}", record.dates_found);
            }
        }
    }

    println!();
    println!("Raw data saved to {}", result.json_path.display());

    Ok(())
}
