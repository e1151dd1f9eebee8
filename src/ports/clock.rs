use chrono::{DateTime, NaiveDate, Utc};

/// 時刻ポート
///
/// 「今日」をテストから固定できるようにする。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
