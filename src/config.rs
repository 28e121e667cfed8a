use crate::error::{AppResult, ConfigError};
use crate::storage::DEFAULT_RECENT_LIMIT;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 题库目录，未设置时使用内置题库
    pub corpus_dir: Option<String>,
    /// 设置文件路径
    pub settings_file: String,
    /// 历史记录默认显示条数
    pub history_limit: usize,
    /// 随机种子，设置后题目与选项顺序可复现
    pub shuffle_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "trivia_data/trivia.db".to_string(),
            corpus_dir: None,
            settings_file: "trivia_data/settings.toml".to_string(),
            history_limit: DEFAULT_RECENT_LIMIT,
            shuffle_seed: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退为默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            database_path: std::env::var("TRIVIA_DB_PATH").unwrap_or(default.database_path),
            corpus_dir: std::env::var("TRIVIA_CORPUS_DIR").ok().filter(|v| !v.is_empty()),
            settings_file: std::env::var("TRIVIA_SETTINGS_FILE").unwrap_or(default.settings_file),
            history_limit: std::env::var("TRIVIA_HISTORY_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.history_limit),
            shuffle_seed: std::env::var("TRIVIA_SEED").ok().and_then(|v| v.parse().ok()),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 严格读取配置，数值型环境变量无法解析时报错
    pub fn try_from_env() -> AppResult<Self> {
        let mut config = Self::from_env();
        if let Some(limit) = parse_var::<usize>("TRIVIA_HISTORY_LIMIT", "usize")? {
            config.history_limit = limit;
        }
        if let Some(seed) = parse_var::<u64>("TRIVIA_SEED", "u64")? {
            config.shuffle_seed = Some(seed);
        }
        if let Some(verbose) = parse_var::<bool>("VERBOSE_LOGGING", "bool")? {
            config.verbose_logging = verbose;
        }
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}
