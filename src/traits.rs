use async_trait::async_trait;

use crate::error::ScraperError;

#[async_trait]
pub trait Extractor: Send + Sync {
    /// 抽出結果の型
    type Output: Send;

    /// ブラウザ初期化
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// データ抽出
    async fn extract(&mut self) -> Result<Self::Output, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// 一括実行（initialize → extract → close）
    ///
    /// extract が失敗してもブラウザは必ず閉じる。
    async fn execute(&mut self) -> Result<Self::Output, ScraperError> {
        self.initialize().await?;
        let result = self.extract().await;
        let close_result = self.close().await;
        let output = result?;
        close_result?;
        Ok(output)
    }
}
