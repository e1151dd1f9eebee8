use serde::{Deserialize, Serialize};

use super::{BookId, LoanId, MemberId};

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLoan {
    pub book_id: BookId,
    pub member_id: MemberId,
}

/// コマンド：返却期限を延長する
///
/// `additional_days` は検証前の生の値（0以下も受け付け、アプリケーション層で拒否する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendDueDate {
    pub loan_id: LoanId,
    pub additional_days: i64,
}
