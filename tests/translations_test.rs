//! 翻訳テーブルと設定の結合テスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;
use std::sync::Arc;

use dashboard_i18n::config::{
    ConfigManager,
    StrategyKind,
};
use dashboard_i18n::input::translation::{
    TranslationError,
    flatten_json,
};
use dashboard_i18n::resolver::Lookup;
use dashboard_i18n::store::{
    HeadlessHost,
    LocaleStore,
};
use dashboard_i18n::{
    Locale,
    Translations,
};
use googletest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

#[googletest::test]
fn every_shipped_key_resolves_in_every_locale() {
    let translations = Translations::embedded().unwrap();

    for table in translations.iter() {
        for key in table.leaf_keys(".") {
            let resolved = table.resolve(&key, ".");
            expect_that!(resolved, not(eq(key.as_str())), "{} has no value for {key}", table.locale());
            expect_that!(resolved, not(eq("")));
        }
    }
}

#[googletest::test]
fn shipped_tables_differ_by_locale() {
    let translations = Translations::embedded().unwrap();
    let en = flatten_json(translations.table(Locale::En).root(), ".", None);
    let pt = flatten_json(translations.table(Locale::Pt).root(), ".", None);

    expect_that!(en.get("dashboard.title").map(String::as_str), some(eq("Dashboard")));
    expect_that!(pt.get("dashboard.title").map(String::as_str), some(eq("Painel")));
    expect_that!(en.len(), eq(pt.len()));
}

#[googletest::test]
fn branch_lookup_is_not_a_string() {
    let translations = Translations::embedded().unwrap();
    let table = translations.table(Locale::En);

    expect_that!(matches!(table.lookup("dashboard.cards", "."), Lookup::Branch(_)), eq(true));
    expect_that!(table.resolve("dashboard.cards.netWorth", "."), starts_with("{"));
}

#[rstest]
#[case::missing_pt(None, "MissingLocale")]
#[case::not_an_object(Some("[1, 2]"), "NotAnObject")]
#[case::malformed(Some("{oops"), "Parse")]
fn load_dir_failures(#[case] pt: Option<&str>, #[case] expected: &str) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"hello": "Hello"}"#).unwrap();
    if let Some(pt) = pt {
        fs::write(dir.path().join("pt.json"), pt).unwrap();
    }

    let err = Translations::load_dir(dir.path()).unwrap_err();
    let variant = match err {
        TranslationError::MissingLocale(_) => "MissingLocale",
        TranslationError::NotAnObject { .. } => "NotAnObject",
        TranslationError::Parse { .. } => "Parse",
        _ => "other",
    };

    assert_eq!(variant, expected);
}

#[googletest::test]
fn configured_directory_and_separator_drive_the_store() {
    let dir = TempDir::new().unwrap();
    let locales = dir.path().join("locales");
    fs::create_dir(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"nav": {"home": "Home"}}"#).unwrap();
    fs::write(locales.join("pt.json"), r#"{"nav": {"home": "Início"}}"#).unwrap();
    fs::write(
        dir.path().join(".dashboard-i18n.json"),
        r#"{"translationsDir": "locales", "keySeparator": ":"}"#,
    )
    .unwrap();

    let mut manager = ConfigManager::new();
    manager.load_settings(Some(dir.path().to_path_buf())).unwrap();
    let settings = manager.get_settings();
    let host = Arc::new(HeadlessHost::new(None, "/pt"));
    let store = LocaleStore::from_settings(settings, host).unwrap();

    expect_that!(settings.strategy, eq(StrategyKind::UrlPath));
    expect_that!(store.translate("nav:home"), eq("Início"));
    expect_that!(store.translate("nav.home"), eq("nav.home"));
}
