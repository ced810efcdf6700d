//! 設定ファイルの読み込み関数

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
};

/// ルートからの設定ファイルの相対パス
pub(super) const CONFIG_FILE: &str = "config/translation_center.yml";

/// 設定ファイルのパスを返す
pub(super) fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// ルートディレクトリから指定環境の設定を読み込む
///
/// `config/translation_center.yml` は環境名 (`development`, `production` など) ごとの
/// セクションを持つ
///
/// # Arguments
/// * `root` - アプリケーションのルートパス
/// * `environment` - 読み込む環境名
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込み、パース、または環境セクションが存在しない
///
/// # Errors
/// - ファイル読み込みエラー
/// - YAML パースエラー
/// - 環境セクションが存在しない
pub(super) fn load_from_root(
    root: &Path,
    environment: &str,
) -> Result<Option<Settings>, ConfigError> {
    let path = config_path(root);

    if !path.exists() {
        tracing::debug!("Configuration file not found: {:?}", path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(&path)?;
    let mut sections: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(&content)?;

    let Some(section) = sections.remove(environment) else {
        return Err(ConfigError::MissingEnvironment { environment: environment.to_string(), path });
    };

    // 空のセクションはデフォルト値として扱う
    if section.is_null() {
        return Ok(Some(Settings::default()));
    }

    let settings: Settings = serde_yaml::from_value(section)?;

    Ok(Some(settings))
}
