use crate::domain::GracePeriod;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 猶予期間の上限（100年）
pub const MAX_GRACE_PERIOD_DAYS: u32 = 36_500;

/// スキャン間隔の上限（365日）
pub const MAX_SCAN_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 値が解釈できない
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// 必須の値がない
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// SMTP設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// メール送信方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    /// 送信せずログに出力する（開発用）
    Log,
    /// SMTPで送信する
    Smtp(SmtpConfig),
}

/// アプリケーション設定
///
/// 起動時に1回だけ読み込み、各コンポーネントに明示的に渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// 送信メールの差出人
    pub from_email: String,
    /// 督促までの猶予期間
    pub grace_period: GracePeriod,
    /// 延滞スキャンの実行間隔
    pub scan_interval: Duration,
    /// ジョブワーカー数
    pub worker_count: usize,
    pub mail_transport: MailTransport,
}

impl AppConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// キーと値の組から読み込む
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(String::as_str);

        let grace_days: u32 = parse_or(&vars, "OVERDUE_GRACE_PERIOD_DAYS", GracePeriod::DEFAULT_DAYS)?;
        if grace_days > MAX_GRACE_PERIOD_DAYS {
            return Err(ConfigError::Invalid {
                key: "OVERDUE_GRACE_PERIOD_DAYS",
                value: grace_days.to_string(),
                reason: format!("must be at most {MAX_GRACE_PERIOD_DAYS}"),
            });
        }

        let scan_interval_secs: u64 = parse_or(&vars, "OVERDUE_SCAN_INTERVAL_SECS", 86_400)?;
        if scan_interval_secs == 0 || scan_interval_secs > MAX_SCAN_INTERVAL_SECS {
            return Err(ConfigError::Invalid {
                key: "OVERDUE_SCAN_INTERVAL_SECS",
                value: scan_interval_secs.to_string(),
                reason: format!("must be between 1 and {MAX_SCAN_INTERVAL_SECS}"),
            });
        }

        let worker_count: usize = parse_or(&vars, "JOB_WORKERS", 4)?;
        if worker_count == 0 {
            return Err(ConfigError::Invalid {
                key: "JOB_WORKERS",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let mail_transport = match get("MAIL_TRANSPORT").unwrap_or("log") {
            "log" => MailTransport::Log,
            "smtp" => MailTransport::Smtp(SmtpConfig {
                host: get("SMTP_HOST")
                    .ok_or(ConfigError::Missing("SMTP_HOST"))?
                    .to_string(),
                port: parse_or(&vars, "SMTP_PORT", 587)?,
                username: get("SMTP_USERNAME").map(str::to_string),
                password: get("SMTP_PASSWORD").map(str::to_string),
            }),
            other => {
                return Err(ConfigError::Invalid {
                    key: "MAIL_TRANSPORT",
                    value: other.to_string(),
                    reason: "expected \"log\" or \"smtp\"".to_string(),
                });
            }
        };

        Ok(Self {
            database_url: get("DATABASE_URL")
                .unwrap_or("postgres://localhost/library")
                .to_string(),
            port: parse_or(&vars, "PORT", 3000)?,
            from_email: get("DEFAULT_FROM_EMAIL")
                .unwrap_or("webmaster@localhost")
                .to_string(),
            grace_period: GracePeriod::days(grace_days),
            scan_interval: Duration::from_secs(scan_interval_secs),
            worker_count,
            mail_transport,
        })
    }
}

/// 値があれば解釈し、なければ既定値を使う
fn parse_or<T>(vars: &HashMap<String, String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match vars.get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
    }
}
