use crate::application::notification::NotificationSender;
use crate::domain::LoanId;
use crate::ports::LoanRepository;
use std::sync::Arc;

use super::errors::{LoanApplicationError, Result};

/// 貸出作成通知の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanCreatedOutcome {
    /// 確認通知を1通送った
    Notified,
    /// 実行時に貸出が存在しなかった（通知なし）
    LoanNotFound,
}

/// 貸出作成通知
///
/// 貸出作成ごとに1回、ワーカー上で非同期に実行される。
/// 会員・書籍情報は投入時ではなく実行時に読み取る。
#[derive(Clone)]
pub struct LoanCreatedNotifier {
    loan_repository: Arc<dyn LoanRepository>,
    notification_sender: NotificationSender,
}

impl LoanCreatedNotifier {
    pub fn new(
        loan_repository: Arc<dyn LoanRepository>,
        notification_sender: NotificationSender,
    ) -> Self {
        Self {
            loan_repository,
            notification_sender,
        }
    }

    /// 貸出完了の確認通知を送る
    ///
    /// 貸出が作成後に削除されていた場合は何もせず `LoanNotFound` を返す（エラーではない）。
    #[tracing::instrument(skip(self, loan_id), fields(loan_id = %loan_id.value()))]
    pub async fn on_loan_created(&self, loan_id: LoanId) -> Result<LoanCreatedOutcome> {
        let details = self
            .loan_repository
            .get_details(loan_id)
            .await
            .map_err(LoanApplicationError::RepositoryError)?;

        let Some(details) = details else {
            tracing::debug!("loan no longer exists, skipping confirmation");
            return Ok(LoanCreatedOutcome::LoanNotFound);
        };

        self.notification_sender
            .send_loan_confirmation(
                &details.member.email,
                &details.member.display_name,
                &details.book.title,
            )
            .await?;

        Ok(LoanCreatedOutcome::Notified)
    }
}
