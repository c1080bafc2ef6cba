//! dashboard-i18n
//!
//! Finance dashboard 向けの国際化レイヤー。ロケールの解決と保持、翻訳キーの解決、
//! ロケールに応じた数値・日付の書式化、ロケールなしパスのリダイレクトを提供する。

pub mod audit;
pub mod config;
pub mod dashboard;
pub mod edge;
pub mod format;
pub mod input;
pub mod resolver;
pub mod routing;
pub mod store;
pub mod types;

mod test_utils;

pub use edge::EdgeRedirect;
pub use input::translation::Translations;
pub use store::{
    LocaleStore,
    LocaleSubscriber,
    StoreError,
};
pub use types::Locale;
