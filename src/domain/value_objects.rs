use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 貸出ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 会員ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

/// 延長日数エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionDaysError {
    /// 0以下の日数
    NotPositive(i64),
}

/// 延長日数
///
/// 不変条件：1日以上。
/// 0や負の値では延長できないため、型でこの制約を強制する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDays(u32);

impl ExtensionDays {
    /// 現在の日数
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ExtensionDays {
    type Error = ExtensionDaysError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ExtensionDaysError::NotPositive(value));
        }
        // u32を超える日数は暦の範囲外なので上限で丸め、日付計算側でオーバーフローとして扱う
        Ok(Self(u32::try_from(value).unwrap_or(u32::MAX)))
    }
}

/// 猶予期間（日数）
///
/// 返却期限からこの日数を過ぎた貸出が督促の対象になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GracePeriod(u32);

impl GracePeriod {
    /// 標準の猶予期間
    pub const DEFAULT_DAYS: u32 = 14;

    pub fn days(days: u32) -> Self {
        Self(days)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for GracePeriod {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}
