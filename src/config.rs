use std::path::PathBuf;
use std::time::Duration;

/// Drik Panchang のベースURL
pub const DEFAULT_BASE_URL: &str = "https://www.drikpanchang.com";

/// 出力ディレクトリのデフォルト（下流パイプラインが参照するパス）
pub const DEFAULT_OUTPUT_DIR: &str = "/var/www/hindicalendar/data";

/// スプーフィング用のUser-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// スクレイパー設定
///
/// 旧実装ではパス・待機時間・URLがすべて関数内にハードコードされていた。
/// ここでは名前付きフィールド＋デフォルト値として外部から注入可能にする。
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// ヘッドレスモード
    pub headless: bool,
    /// デバッグモード（本文ダンプ・スクリーンショット保存）
    pub debug: bool,
    /// Chromium実行ファイルのパス（Noneなら CHROME_PATH / CHROMIUM_PATH 環境変数、
    /// それもなければ "chromium"）
    pub chrome_path: Option<PathBuf>,
    /// ウィンドウ幅
    pub window_width: u32,
    /// ウィンドウ高さ
    pub window_height: u32,
    /// User-Agent文字列
    pub user_agent: String,
    /// スクレイプ対象サイトのベースURL
    pub base_url: String,
    /// JSON出力先ディレクトリ
    pub output_dir: PathBuf,
    /// 一覧ページのテーブル出現待ちタイムアウト
    pub list_ready_timeout: Duration,
    /// 詳細ページのロード完了待ちタイムアウト
    pub detail_ready_timeout: Duration,
    /// CDPリクエストタイムアウト
    pub nav_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            debug: false,
            chrome_path: None,
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            list_ready_timeout: Duration::from_secs(15),
            detail_ready_timeout: Duration::from_secs(10),
            nav_timeout: Duration::from_secs(60),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_list_ready_timeout(mut self, timeout: Duration) -> Self {
        self.list_ready_timeout = timeout;
        self
    }

    pub fn with_detail_ready_timeout(mut self, timeout: Duration) -> Self {
        self.detail_ready_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert!(!config.debug);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_headless(false)
            .with_debug(true)
            .with_base_url("http://localhost:8080")
            .with_output_dir("/tmp/panchang")
            .with_list_ready_timeout(Duration::from_secs(3));

        assert!(!config.headless);
        assert!(config.debug);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/panchang"));
        assert_eq!(config.list_ready_timeout, Duration::from_secs(3));
    }
}
