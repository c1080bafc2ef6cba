//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::Value;

use crate::input::translation::{
    TranslationTable,
    Translations,
};
use crate::store::{
    HeadlessHost,
    LocaleStore,
    UrlPathStrategy,
};
use crate::types::Locale;

/// テスト用の Translations を作成する
///
/// # Arguments
/// * `en` - 英語テーブルのルート
/// * `pt` - ポルトガル語テーブルのルート
pub(crate) fn create_translations(en: Value, pt: Value) -> Translations {
    Translations::from_tables([
        TranslationTable::new(Locale::En, en, "en.json").unwrap(),
        TranslationTable::new(Locale::Pt, pt, "pt.json").unwrap(),
    ])
    .unwrap()
}

/// 組み込みテーブルと URL パス戦略でストアを作成する
///
/// ロケールは `path` の先頭セグメントから決まる
pub(crate) fn create_url_store(path: &str) -> (Arc<LocaleStore>, Arc<HeadlessHost>) {
    let host = Arc::new(HeadlessHost::new(None, path));
    let store = LocaleStore::new(
        Arc::new(Translations::embedded().unwrap()),
        Box::new(UrlPathStrategy),
        host.clone(),
        ".",
    );
    (store, host)
}
