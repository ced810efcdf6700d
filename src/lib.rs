//! translation-center
//!
//! 翻訳ストアを備えた i18n バックエンド。`customer.` 配下のキーを初回参照時に
//! ストアへ登録し、設定に応じてストアまたは静的な翻訳ファイルから値を返す。

pub mod backend;
pub mod config;
pub mod input;
pub mod resolver;
pub mod store;
pub mod text;
pub mod translator;
pub mod types;

mod test_utils;

pub use backend::{
    BackendError,
    MissingTranslation,
    StaticSource,
    TranslationBackend,
};
