//! # 祝日カレンダーの利用可否
//!
//! 起動時に祝日テーブルを読み込み、その結果を [`CalendarStatus`] として確定する。
//! 読み込みに失敗してもサーバーは起動し、判定リクエストには
//! `gem_unavailable` エラーを返す。

use std::{fmt, sync::Arc};

use eigyobi_infra::{BusinessCalendar, HolidayTable, InfraError, JapaneseHolidayCalendar};

use crate::config::CalendarConfig;

/// 起動時に確定する祝日カレンダーの状態（以後変化しない）
#[derive(Clone)]
pub enum CalendarStatus {
    Available(Arc<dyn BusinessCalendar>),
    Unavailable { reason: String },
}

impl CalendarStatus {
    /// 設定に従って祝日カレンダーを初期化する
    #[tracing::instrument(skip_all)]
    pub fn load(config: &CalendarConfig) -> Self {
        match load_calendar(config) {
            Ok(calendar) => {
                tracing::info!(
                    first_year = calendar.table().first_year(),
                    last_year = calendar.table().last_year(),
                    year_end_closure = config.year_end_closure,
                    "祝日カレンダーを読み込みました"
                );
                Self::Available(Arc::new(calendar))
            }
            Err(e) => {
                let kind = format!("{:?}", e.kind());
                // 原因（io / csv のエラー）まで 1 行にまとめる
                let reason = format!("{:#}", anyhow::Error::new(e));
                tracing::warn!(
                    error.message = %reason,
                    error.kind = %kind,
                    "祝日カレンダーを利用できません"
                );
                Self::Unavailable { reason }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// 利用可能なカレンダー
    pub fn calendar(&self) -> Option<&Arc<dyn BusinessCalendar>> {
        match self {
            Self::Available(calendar) => Some(calendar),
            Self::Unavailable { .. } => None,
        }
    }

    /// 利用できない理由
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

impl fmt::Debug for CalendarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

fn load_calendar(config: &CalendarConfig) -> Result<JapaneseHolidayCalendar, InfraError> {
    let table = match &config.holiday_data_path {
        Some(path) => HolidayTable::from_path(path)?,
        None => HolidayTable::embedded()?,
    };
    Ok(JapaneseHolidayCalendar::new(table).with_year_end_closure(config.year_end_closure))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_既定の設定では埋め込みテーブルで利用可能() {
        let status = CalendarStatus::load(&CalendarConfig::default());

        assert!(status.is_available());
        assert_eq!(status.unavailable_reason(), None);

        let calendar = status.calendar().unwrap();
        let coming_of_age_day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(!calendar.is_business_day(coming_of_age_day).unwrap());
    }

    #[test]
    fn test_存在しないファイルを指定すると利用不可() {
        let config = CalendarConfig {
            holiday_data_path: Some(PathBuf::from("/nonexistent/holidays.csv")),
            year_end_closure:  false,
        };

        let status = CalendarStatus::load(&config);

        assert!(!status.is_available());
        assert!(status.calendar().is_none());
        let reason = status.unavailable_reason().unwrap();
        assert!(reason.starts_with("祝日データを読み込めません: "), "{reason}");
        assert_eq!(reason.matches("os error").count(), 1, "{reason}");
    }

    #[test]
    fn test_年末年始休業の設定が反映される() {
        let config = CalendarConfig {
            holiday_data_path: None,
            year_end_closure:  true,
        };

        let status = CalendarStatus::load(&config);

        let new_years_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(
            !status
                .calendar()
                .unwrap()
                .is_business_day(new_years_eve)
                .unwrap()
        );
    }
}
