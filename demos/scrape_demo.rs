//! Ekadashi スクレイパーデモ
//!
//! 実行方法:
//! ```
//! cargo run --example scrape_demo
//! ```

use panchang_scraper::{Extractor, ListScraper, ScraperConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ログ設定
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let year = 2026;

    println!("=== Ekadashi List Scraper Demo ===");
    println!("Year: {}", year);
    println!("Headless: false (visible browser)");
    println!();

    let config = ScraperConfig::default()
        .with_headless(false) // ブラウザを表示
        .with_debug(true)
        .with_output_dir("./data");

    let mut scraper = ListScraper::new(config, year);
    let records = scraper.execute().await?;

    println!();
    println!("=== Results ===");
    println!("Records found: {}", records.len());
    println!();

    // 最初の5件を表示
    for (i, record) in records.iter().take(5).enumerate() {
        println!("{}. {} - {}", i + 1, record.name, record.date_text);
    }

    if records.len() > 5 {
        println!("... and {} more", records.len() - 5);
    }

    println!();
    println!("Demo completed successfully!");

    Ok(())
}
