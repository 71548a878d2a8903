//! # Clock（時刻プロバイダ）
//!
//! `Utc::now()` の直接呼び出しを置き換え、テストで固定時刻を注入可能にするための抽象化。
//! 営業日判定は日本時間で行うため、JST の現在時刻と日付も提供する。

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// JST の UTC からのオフセット（秒）
const JST_OFFSET_SECONDS: i32 = 9 * 60 * 60;

/// 日本標準時のタイムゾーン
pub fn jst() -> FixedOffset {
   FixedOffset::east_opt(JST_OFFSET_SECONDS).expect("JST のオフセットは常に有効")
}

/// 現在時刻の供給源
///
/// 判定に使う「今日」はすべて JST で数える。
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;

   /// 日本時間の現在時刻
   fn now_jst(&self) -> DateTime<FixedOffset> {
      self.now().with_timezone(&jst())
   }

   /// 日本時間の今日の日付
   fn today(&self) -> NaiveDate {
      self.now_jst().date_naive()
   }
}

/// OS の時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返す時計（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
