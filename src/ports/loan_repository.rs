use crate::domain::{Book, Loan, Member, value_objects::LoanId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出と、その会員・書籍をまとめたビュー
///
/// 通知に必要な宛先とタイトルを1回の読み取りで得るための非正規化ビュー。
/// 読み取り時点の会員・書籍情報を反映する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanDetails {
    pub loan: Loan,
    pub member: Member,
    pub book: Book,
}

/// 貸出リポジトリポート
///
/// 貸出レコードの永続化と取得を抽象化する。
/// 参照整合性（会員・書籍の存在）はストア側の責務。
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// 新しい貸出を保存する
    async fn insert(&self, loan: Loan) -> Result<()>;

    /// IDで貸出を取得する
    async fn get_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>>;

    /// IDで貸出と会員・書籍情報を取得する
    async fn get_details(&self, loan_id: LoanId) -> Result<Option<LoanDetails>>;

    /// 未返却かつ `due_date < cutoff` の貸出を検索する
    ///
    /// 順序は保証しない。
    async fn find_unreturned_due_before(&self, cutoff: NaiveDate) -> Result<Vec<LoanDetails>>;

    /// 返却期限を更新する（compare-and-set）
    ///
    /// 現在の返却期限が `expected` と一致し、かつ未返却の場合のみ `new_due_date` に更新する。
    /// 更新した場合は `true`、他の更新と競合した場合は `false` を返す。
    async fn update_due_date(
        &self,
        loan_id: LoanId,
        expected: NaiveDate,
        new_due_date: NaiveDate,
    ) -> Result<bool>;
}
