//! # Web サーバー設定
//!
//! 環境変数から Web サーバーと祝日カレンダーの設定を読み込む。

use std::{env, path::PathBuf};

use anyhow::{Context as _, bail};

/// Web サーバーの設定
#[derive(Debug, Clone)]
pub struct WebConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// 祝日カレンダーの設定
   pub calendar: CalendarConfig,
}

/// 祝日カレンダーの設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarConfig {
   /// 祝日 CSV のパス（未設定なら埋め込みテーブルを使う）
   pub holiday_data_path: Option<PathBuf>,
   /// 年末年始休業（12/31, 1/2, 1/3）を非営業日として扱う
   pub year_end_closure: bool,
}

impl WebConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> anyhow::Result<Self> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意のキー参照関数から設定を読み込む
   fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
      let host = lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
      let port = match lookup("WEB_PORT") {
         Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("WEB_PORT は有効なポート番号である必要があります: {value:?}"))?,
         None => 4567,
      };

      let holiday_data_path = lookup("HOLIDAY_DATA_PATH")
         .filter(|value| !value.trim().is_empty())
         .map(PathBuf::from);
      let year_end_closure = match lookup("YEAR_END_CLOSURE") {
         Some(value) => parse_bool("YEAR_END_CLOSURE", &value)?,
         None => false,
      };

      Ok(Self {
         host,
         port,
         calendar: CalendarConfig {
            holiday_data_path,
            year_end_closure,
         },
      })
   }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
   match value.trim().to_ascii_lowercase().as_str() {
      "true" | "1" | "yes" | "on" => Ok(true),
      "false" | "0" | "no" | "off" | "" => Ok(false),
      _ => bail!("{key} は true / false のいずれかである必要があります: {value:?}"),
   }
}

#[cfg(test)]
mod tests {
   // テスト間で環境変数の競合を避けるため、from_lookup で検証する

   use std::collections::HashMap;

   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn load(vars: &[(&str, &str)]) -> anyhow::Result<WebConfig> {
      let vars: HashMap<String, String> = vars
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      WebConfig::from_lookup(|key| vars.get(key).cloned())
   }

   #[test]
   fn test_未設定のときはデフォルト値() {
      let config = load(&[]).unwrap();

      assert_eq!(config.host, "0.0.0.0");
      assert_eq!(config.port, 4567);
      assert_eq!(config.calendar, CalendarConfig::default());
   }

   #[test]
   fn test_環境変数の値が反映される() {
      let config = load(&[
         ("WEB_HOST", "127.0.0.1"),
         ("WEB_PORT", "8080"),
         ("HOLIDAY_DATA_PATH", "/etc/eigyobi/holidays.csv"),
         ("YEAR_END_CLOSURE", "true"),
      ])
      .unwrap();

      assert_eq!(config.host, "127.0.0.1");
      assert_eq!(config.port, 8080);
      assert_eq!(
         config.calendar.holiday_data_path,
         Some(PathBuf::from("/etc/eigyobi/holidays.csv"))
      );
      assert!(config.calendar.year_end_closure);
   }

   #[test]
   fn test_不正なポート番号はエラー() {
      let err = load(&[("WEB_PORT", "abc")]).unwrap_err();

      assert!(err.to_string().contains("WEB_PORT"));
   }

   #[test]
   fn test_空のholiday_data_pathは未設定扱い() {
      let config = load(&[("HOLIDAY_DATA_PATH", "  ")]).unwrap();

      assert_eq!(config.calendar.holiday_data_path, None);
   }

   #[rstest]
   #[case("true", true)]
   #[case("TRUE", true)]
   #[case("1", true)]
   #[case("false", false)]
   #[case("0", false)]
   #[case("", false)]
   fn test_真偽値のパース(#[case] value: &str, #[case] expected: bool) {
      assert_eq!(parse_bool("YEAR_END_CLOSURE", value).unwrap(), expected);
   }

   #[test]
   fn test_不正な真偽値はエラー() {
      let err = load(&[("YEAR_END_CLOSURE", "maybe")]).unwrap_err();

      assert!(err.to_string().contains("YEAR_END_CLOSURE"));
   }
}
