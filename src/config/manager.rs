//! 設定ファイルの探索と検証をまとめる

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 検証済みの設定と、その読み込み元
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    settings: I18nSettings,

    /// 設定ファイルを探したディレクトリ（読み込み成功時のみ）
    config_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `config_root` の `.dashboard-i18n.json` を読み込んで検証する
    ///
    /// ファイルがなければデフォルト値を使う。失敗した場合は以前の設定を保持する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let loaded = match &config_root {
            Some(root) => loader::load_from_dir(root)?,
            None => None,
        };
        let settings = loaded.unwrap_or_default();

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(strategy = ?settings.strategy, "Settings ready: {:?}", settings);
        self.settings = settings;
        self.config_root = config_root;
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.settings
    }

    #[must_use]
    pub fn config_root(&self) -> Option<&Path> {
        self.config_root.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::StrategyKind;

    fn dir_with_config(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".dashboard-i18n.json"), content).unwrap();
        dir
    }

    #[rstest]
    fn defaults_without_root() {
        let mut manager = ConfigManager::new();

        manager.load_settings(None).unwrap();

        assert_eq!(manager.get_settings().key_separator, ".");
        assert_eq!(manager.get_settings().strategy, StrategyKind::UrlPath);
        assert!(manager.config_root().is_none());
    }

    #[rstest]
    fn defaults_when_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::new();

        manager.load_settings(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(manager.get_settings().strategy, StrategyKind::UrlPath);
        assert_eq!(manager.config_root(), Some(dir.path()));
    }

    #[rstest]
    fn reads_strategy_from_file() {
        let dir = dir_with_config(r#"{"strategy": "storage"}"#);
        let mut manager = ConfigManager::new();

        manager.load_settings(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(manager.get_settings().strategy, StrategyKind::Storage);
    }

    /// 検証に失敗しても以前の設定は残る
    #[googletest::test]
    fn invalid_file_keeps_previous_settings() {
        let good = dir_with_config(r#"{"keySeparator": ":"}"#);
        let bad = dir_with_config(r#"{"edge": {"excludePatterns": ["[broken"]}}"#);
        let mut manager = ConfigManager::new();
        manager.load_settings(Some(good.path().to_path_buf())).unwrap();

        let result = manager.load_settings(Some(bad.path().to_path_buf()));

        expect_that!(matches!(result, Err(ConfigError::ValidationErrors(_))), eq(true));
        expect_that!(manager.get_settings().key_separator, eq(":"));
        expect_that!(manager.config_root(), some(eq(good.path())));
    }

    #[rstest]
    fn malformed_json_is_an_error() {
        let dir = dir_with_config("{ not json");
        let mut manager = ConfigManager::new();

        assert!(manager.load_settings(Some(dir.path().to_path_buf())).is_err());
    }
}
