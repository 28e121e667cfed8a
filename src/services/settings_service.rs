//! 语言设置服务
//!
//! 单一的持久化位置（TOML 文件），单一读取路径。
//! 修改在下次启动时生效。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError};
use crate::models::Language;

/// 应用设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub language: Language,
}

/// 磁盘上的设置文件格式
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

/// 设置读写服务
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取设置，文件不存在时返回默认值
    pub async fn load(&self) -> AppResult<Settings> {
        let path_str = self.path.display().to_string();
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("设置文件不存在，使用默认设置: {}", path_str);
                return Ok(Settings::default());
            }
            Err(e) => return Err(AppError::file_read_failed(path_str, e)),
        };

        let file: SettingsFile = toml::from_str(&content).map_err(|source| {
            AppError::File(FileError::TomlParseFailed {
                path: path_str,
                source,
            })
        })?;

        Ok(Settings {
            language: file
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or_default(),
        })
    }

    /// 保存设置
    pub async fn save(&self, settings: &Settings) -> AppResult<()> {
        let path_str = self.path.display().to_string();
        let file = SettingsFile {
            language: Some(settings.language.code().to_string()),
        };
        let content = toml::to_string(&file).map_err(FileError::from)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
            }
        }
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path_str, e))?;
        Ok(())
    }

    /// 修改显示语言
    pub async fn save_language(&self, language: Language) -> AppResult<Settings> {
        let mut settings = self.load().await?;
        settings.language = language;
        self.save(&settings).await?;
        info!("✓ 显示语言已设置为 {}，下次启动生效", language);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("trivia-settings-{}-{}", std::process::id(), name))
            .join("settings.toml")
    }

    #[tokio::test]
    async fn missing_file_defaults_to_english() {
        let service = SettingsService::new(temp_settings("missing"));
        let settings = service.load().await.unwrap();
        assert_eq!(settings.language, Language::English);
    }

    #[tokio::test]
    async fn saved_language_is_read_back() {
        let path = temp_settings("roundtrip");
        let service = SettingsService::new(&path);
        service.save_language(Language::Arabic).await.unwrap();
        assert_eq!(service.load().await.unwrap().language, Language::Arabic);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("language = \"ar\""));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn unknown_code_falls_back_and_malformed_file_fails() {
        let path = temp_settings("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let service = SettingsService::new(&path);

        std::fs::write(&path, "language = \"fr\"\n").unwrap();
        assert_eq!(service.load().await.unwrap().language, Language::English);

        std::fs::write(&path, "language = [").unwrap();
        let err = service.load().await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
