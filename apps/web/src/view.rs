//! # HTML テンプレートの描画
//!
//! tera で入力フォームと判定結果ページを描画する。
//! テンプレートは `include_str!` でバイナリに埋め込む。

use chrono::NaiveDate;
use eigyobi_domain::{ErrorKind, check::CheckResult, date::YearRange};
use tera::{Context, Tera};

use crate::error::WebError;

const ISO_DATE: &str = "%Y-%m-%d";

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 埋め込みテンプレートを登録したレンダラーを作成する
    pub fn new() -> Result<Self, WebError> {
        let mut engine = Tera::default();

        engine.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("result.html", include_str!("../templates/result.html")),
        ])?;

        Ok(Self { engine })
    }

    /// 入力フォームを描画する
    ///
    /// 既定値は今日。`min` / `max` 属性はサーバー側の受付範囲に合わせる。
    pub fn render_index(&self, today: NaiveDate) -> Result<String, WebError> {
        let mut context = Context::new();
        context.insert("default_date", &today.format(ISO_DATE).to_string());
        insert_range(&mut context, today);

        Ok(self.engine.render("index.html", &context)?)
    }

    /// 判定結果ページを描画する
    pub fn render_result(&self, result: &CheckResult, today: NaiveDate) -> Result<String, WebError> {
        let mut context = Context::new();
        insert_range(&mut context, today);

        match result {
            Ok(check) => {
                context.insert("success", &true);
                context.insert("date_label", &check.date.to_japanese_string());
                context.insert("is_business_day", &check.is_business_day);
                context.insert("reason", &check.reason.as_ref().map(ToString::to_string));
                context.insert("input_echo", &check.input_echo);
            }
            Err(e) => {
                let kind = e.kind();
                context.insert("success", &false);
                context.insert("error_kind", &kind);
                context.insert("error_message", &e.to_string());
                context.insert("hint", hint(kind));
            }
        }

        Ok(self.engine.render("result.html", &context)?)
    }
}

fn insert_range(context: &mut Context, today: NaiveDate) {
    let range = YearRange::for_today(today);
    context.insert(
        "min_date",
        &range.first_day().map(|d| d.format(ISO_DATE).to_string()),
    );
    context.insert(
        "max_date",
        &range.last_day().map(|d| d.format(ISO_DATE).to_string()),
    );
}

/// エラー種別ごとの対処方法
fn hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "1900年以降の日付をカレンダーから選択してください。",
        ErrorKind::Format => "YYYY-MM-DD 形式（例：2024-01-15）で入力してください。",
        ErrorKind::CalendarUnavailable => "管理者に祝日データの設定を確認するよう依頼してください。",
        ErrorKind::LookupFailure => "時間をおいて再度お試しください。",
        ErrorKind::System => "問題が続く場合は管理者にお問い合わせください。",
    }
}
