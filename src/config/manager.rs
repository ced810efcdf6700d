//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    Settings,
    loader,
};

/// デフォルトの環境名
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// 設定管理を行う
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: Settings,

    /// アプリケーションのルートパス
    root: Option<PathBuf>,

    /// 読み込んだ環境名
    environment: String,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_settings: Settings::default(),
            root: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイルが存在しない場合はデフォルト値を使用する
    ///
    /// # Arguments
    /// * `root` - アプリケーションのルートパス
    /// * `environment` - 環境名 (`development`, `production` など)
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - YAML パースエラー
    /// - 環境セクションが存在しない
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        root: Option<PathBuf>,
        environment: &str,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for root: {:?}, environment: {}", root, environment);

        let loaded = match &root {
            Some(root) => loader::load_from_root(root, environment)?,
            None => None,
        };

        let settings = loaded.unwrap_or_else(|| {
            tracing::warn!(
                "{} not found, using default settings",
                loader::CONFIG_FILE
            );
            Settings::default()
        });

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        self.root = root;
        self.environment = environment.to_string();
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// 設定を取り出す
    #[must_use]
    pub fn into_settings(self) -> Settings {
        self.current_settings
    }

    /// ルートパスを取得
    #[must_use]
    pub const fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    /// 環境名を取得
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{
        I18nSource,
        InspectorMode,
    };

    /// テスト用のルートディレクトリを作成
    fn root_with_config(content: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        fs::write(temp_dir.path().join("config/translation_center.yml"), content).unwrap();
        temp_dir
    }

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings(), &Settings::default());
        assert_eq!(manager.environment(), DEFAULT_ENVIRONMENT);
        assert!(manager.root().is_none());
    }

    /// load_settings: root が None の場合
    #[rstest]
    fn test_load_settings_without_root() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None, "production");

        assert!(result.is_ok());
        assert!(!manager.get_settings().enabled);
        assert_eq!(manager.environment(), "production");
        assert!(manager.root().is_none());
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = root_with_config(
            "production:\n  enabled: true\n  inspector: all\n  i18n_source: db\n  lang:\n    en:\n      name: English\n    de:\n      name: Deutsch\n",
        );

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), "production");

        assert!(result.is_ok());
        let settings = manager.get_settings();
        assert!(settings.enabled);
        assert_eq!(settings.inspector, InspectorMode::All);
        assert_eq!(settings.i18n_source, I18nSource::Db);
        assert_eq!(settings.available_locales(), vec!["de", "en"]);
        assert!(manager.root().is_some());
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), "development");

        assert!(result.is_ok());
        assert_eq!(manager.get_settings(), &Settings::default());
    }

    /// load_settings: 無効な設定でエラー、設定は変更されない
    #[rstest]
    fn test_load_settings_invalid() {
        let temp_dir = root_with_config("development:\n  enabled: true\n  lang: {}\n");

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), "development");

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(!manager.get_settings().enabled);
    }

    /// into_settings: 読み込んだ設定を取り出す
    #[rstest]
    fn test_into_settings() {
        let temp_dir = root_with_config("test:\n  save_default_translation: false\n");

        let mut manager = ConfigManager::new();
        manager.load_settings(Some(temp_dir.path().to_path_buf()), "test").unwrap();

        assert!(!manager.into_settings().save_default_translation);
    }
}
