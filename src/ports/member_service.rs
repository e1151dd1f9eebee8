use crate::domain::value_objects::MemberId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員サービスポート
///
/// 貸出作成前の会員バリデーションに使用される。
#[async_trait]
pub trait MemberService: Send + Sync {
    /// 会員が存在するか確認する
    async fn exists(&self, member_id: MemberId) -> Result<bool>;
}
