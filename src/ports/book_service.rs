use crate::domain::value_objects::BookId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍サービスポート
#[async_trait]
pub trait BookService: Send + Sync {
    /// 書籍が存在するか確認する
    async fn exists(&self, book_id: BookId) -> Result<bool>;
}
