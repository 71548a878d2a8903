//! # 営業日判定ユースケース
//!
//! 利用者の入力を検証し、祝日カレンダーに照会して判定結果を組み立てる。
//!
//! ## 処理の順序
//!
//! 1. 送信内容の事前チェック（未入力・解釈不能）
//! 2. 入力検証（[`DateQuery::validate`]、年の範囲チェック）
//! 3. カレンダーの利用可否チェック
//! 4. 営業日判定と理由の決定（土曜 → 日曜 → 祝日 → その他）
//!
//! カレンダーへの照会はブロッキング処理のため、ハンドラは
//! `spawn_blocking` 上でこのユースケースを実行する。

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use eigyobi_domain::{
    CheckError,
    check::{BusinessDayCheck, CheckResult, NonBusinessReason},
    clock::Clock,
    date::{DateQuery, ValidatedDate, parse_date},
};
use eigyobi_infra::BusinessCalendar;

use crate::state::CalendarStatus;

/// フォーム送信で日付が空だった場合のメッセージ
pub const BLANK_SUBMISSION_MESSAGE: &str =
    "日付が入力されていません。カレンダーから日付を選択してください。";

/// フォーム送信の内容が日付として解釈できない場合のメッセージ
pub const UNPARSEABLE_SUBMISSION_MESSAGE: &str =
    "入力された日付の形式が正しくありません。有効な日付を選択してください。";

/// 営業日判定ユースケース実装
pub struct BusinessDayUseCaseImpl {
    calendar: Arc<CalendarStatus>,
    clock:    Arc<dyn Clock>,
}

impl BusinessDayUseCaseImpl {
    pub fn new(calendar: Arc<CalendarStatus>, clock: Arc<dyn Clock>) -> Self {
        Self { calendar, clock }
    }

    /// 入力された日付が営業日かどうかを判定する
    ///
    /// 成功時の結果には入力文字列をそのまま `input_echo` として含める。
    #[tracing::instrument(skip_all, fields(input = %query.as_str()))]
    pub fn check(&self, query: &DateQuery) -> CheckResult {
        precheck_submission(query)?;

        let date = query.validate(self.clock.today())?;

        let Some(calendar) = self.calendar.calendar() else {
            return Err(CheckError::CalendarUnavailable);
        };

        classify(calendar.as_ref(), date, query.as_str())
    }
}

/// 送信内容の事前チェック
///
/// ブラウザ側の入力制限に依存せず、サーバー側でも空入力と解釈不能な入力を弾く。
fn precheck_submission(query: &DateQuery) -> Result<(), CheckError> {
    if query.is_blank() {
        return Err(CheckError::Validation(BLANK_SUBMISSION_MESSAGE.to_string()));
    }
    if parse_date(query.as_str()).is_none() {
        return Err(CheckError::Format(UNPARSEABLE_SUBMISSION_MESSAGE.to_string()));
    }
    Ok(())
}

/// 検証済みの日付をカレンダーに照会して判定結果を組み立てる
fn classify(
    calendar: &dyn BusinessCalendar,
    date: ValidatedDate,
    input_echo: &str,
) -> CheckResult {
    let day = date.as_naive_date();

    if calendar.is_business_day(day).map_err(lookup_failure)? {
        return Ok(BusinessDayCheck::business_day(date, input_echo));
    }

    let reason = match date.weekday() {
        Weekday::Sat => NonBusinessReason::Saturday,
        Weekday::Sun => NonBusinessReason::Sunday,
        _ => {
            if calendar.is_holiday(day).map_err(lookup_failure)? {
                holiday_reason(calendar, day)
            } else {
                NonBusinessReason::NotBusinessDay
            }
        }
    };

    Ok(BusinessDayCheck::non_business_day(date, reason, input_echo))
}

/// 祝日名を引いて理由を決める
///
/// 名前が取得できない場合（`None` または照会失敗）は汎用の「日本の祝日」にする。
fn holiday_reason(calendar: &dyn BusinessCalendar, day: NaiveDate) -> NonBusinessReason {
    match calendar.holiday_name(day) {
        Ok(Some(name)) => NonBusinessReason::NamedHoliday(name),
        Ok(None) => NonBusinessReason::Holiday,
        Err(e) => {
            tracing::debug!(error.message = %e, %day, "祝日名を取得できませんでした");
            NonBusinessReason::Holiday
        }
    }
}

fn lookup_failure(error: eigyobi_infra::InfraError) -> CheckError {
    tracing::warn!(error.message = %error, "祝日カレンダーの照会に失敗しました");
    CheckError::LookupFailure(error.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use eigyobi_domain::{ErrorKind, clock::FixedClock, error::CALENDAR_UNAVAILABLE_MESSAGE};
    use eigyobi_infra::mock::MockBusinessCalendar;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2024-01-15 10:00 JST 固定の時計
    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap(),
        ))
    }

    fn sut(calendar: MockBusinessCalendar) -> BusinessDayUseCaseImpl {
        BusinessDayUseCaseImpl::new(
            Arc::new(CalendarStatus::Available(Arc::new(calendar))),
            clock(),
        )
    }

    fn default_calendar() -> MockBusinessCalendar {
        MockBusinessCalendar::new().with_holiday(ymd(2024, 1, 8), "成人の日")
    }

    #[test]
    fn test_平日は営業日() {
        let check = sut(default_calendar())
            .check(&DateQuery::new("2024-01-10"))
            .unwrap();

        assert_eq!(check.date.as_naive_date(), ymd(2024, 1, 10));
        assert!(check.is_business_day);
        assert_eq!(check.reason, None);
        assert_eq!(check.input_echo, "2024-01-10");
    }

    #[rstest]
    #[case::土曜日("2024-01-13", NonBusinessReason::Saturday)]
    #[case::日曜日("2024-01-14", NonBusinessReason::Sunday)]
    #[case::祝日("2024-01-08", NonBusinessReason::NamedHoliday("成人の日".to_string()))]
    fn test_非営業日の理由(#[case] input: &str, #[case] expected: NonBusinessReason) {
        let check = sut(default_calendar()).check(&DateQuery::new(input)).unwrap();

        assert!(!check.is_business_day);
        assert_eq!(check.reason, Some(expected));
    }

    #[test]
    fn test_週末の祝日は曜日が優先される() {
        // 2024-02-11 建国記念の日（日曜日）
        let calendar = MockBusinessCalendar::new().with_holiday(ymd(2024, 2, 11), "建国記念の日");

        let check = sut(calendar).check(&DateQuery::new("2024-02-11")).unwrap();

        assert_eq!(check.reason, Some(NonBusinessReason::Sunday));
    }

    #[test]
    fn test_祝日名が取得できなければ汎用の理由() {
        let calendar = MockBusinessCalendar::new().with_unnamed_holiday(ymd(2024, 1, 8));

        let check = sut(calendar).check(&DateQuery::new("2024-01-08")).unwrap();

        assert_eq!(check.reason, Some(NonBusinessReason::Holiday));
        assert_eq!(check.reason.unwrap().to_string(), "日本の祝日");
    }

    #[test]
    fn test_祝日名の照会失敗は汎用の理由に置き換える() {
        let calendar = default_calendar().failing_holiday_name("name lookup failed");

        let check = sut(calendar).check(&DateQuery::new("2024-01-08")).unwrap();

        assert_eq!(check.reason, Some(NonBusinessReason::Holiday));
    }

    #[test]
    fn test_祝日でも週末でもない非営業日() {
        let calendar = MockBusinessCalendar::new().with_closure(ymd(2024, 12, 31));

        let check = sut(calendar).check(&DateQuery::new("2024-12-31")).unwrap();

        assert_eq!(check.reason, Some(NonBusinessReason::NotBusinessDay));
        assert_eq!(check.reason.unwrap().to_string(), "営業日ではありません");
    }

    #[test]
    fn test_入力文字列はそのまま返す() {
        let check = sut(default_calendar())
            .check(&DateQuery::new(" 2024/1/10 "))
            .unwrap();

        assert_eq!(check.input_echo, " 2024/1/10 ");
        assert_eq!(check.date.to_string(), "2024-01-10");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_未入力は事前チェックでvalidation(#[case] input: &str) {
        let err = sut(default_calendar())
            .check(&DateQuery::new(input))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), BLANK_SUBMISSION_MESSAGE);
    }

    #[test]
    fn test_解釈できない入力は事前チェックでformat() {
        let err = sut(default_calendar())
            .check(&DateQuery::new("not-a-date"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), UNPARSEABLE_SUBMISSION_MESSAGE);
    }

    #[rstest]
    #[case("1899-12-31")]
    #[case("2035-01-01")]
    fn test_範囲外の年はvalidation(#[case] input: &str) {
        let err = sut(default_calendar())
            .check(&DateQuery::new(input))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "日付の年が範囲外です。1900年から2034年の間で入力してください。"
        );
    }

    #[test]
    fn test_カレンダーが利用できない場合() {
        let sut = BusinessDayUseCaseImpl::new(
            Arc::new(CalendarStatus::Unavailable {
                reason: "祝日データが空です".to_string(),
            }),
            clock(),
        );

        let err = sut.check(&DateQuery::new("2024-01-10")).unwrap_err();

        assert_eq!(err, CheckError::CalendarUnavailable);
        assert_eq!(err.to_string(), CALENDAR_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_入力検証はカレンダーの利用可否より先に行う() {
        let sut = BusinessDayUseCaseImpl::new(
            Arc::new(CalendarStatus::Unavailable {
                reason: "祝日データが空です".to_string(),
            }),
            clock(),
        );

        let err = sut.check(&DateQuery::new("not-a-date")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_照会失敗はlookup_failure() {
        let calendar = MockBusinessCalendar::new().failing_lookup("connection reset");

        let err = sut(calendar)
            .check(&DateQuery::new("2024-01-10"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::LookupFailure);
        assert_eq!(
            err.to_string(),
            "営業日の判定中にエラーが発生しました：予期しないエラー: connection reset"
        );
    }
}
