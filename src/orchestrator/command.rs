use crate::error::{AppResult, ConfigError};
use crate::models::{Language, Topic};

/// 命令行命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 开始一轮答题（原始字符串，未知值按默认处理）
    Play { topic: String, difficulty: String },
    /// 查看历史记录，可按模块过滤
    History { topic: Option<Topic> },
    /// 清空历史记录
    ClearHistory,
    /// 设置显示语言
    SetLanguage(Language),
    /// 列出模块与题目数量
    Topics,
    Help,
}

impl Command {
    pub const USAGE: &'static str = "\
用法: trivia <命令>

  play <topic> <difficulty>   开始答题 (topic: culture|history, difficulty: easy|moderate|hard)
  history [topic]             查看最近的答题记录
  clear-history               清空答题记录
  lang <en|ar>                设置显示语言（下次启动生效）
  topics                      列出模块与题目数量";

    /// 解析命令行参数（不含程序名）
    pub fn parse<I, T>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut iter = args.iter().map(String::as_str);

        let command = match iter.next() {
            None | Some("help") | Some("-h") | Some("--help") => Command::Help,
            Some("play") => Command::Play {
                topic: iter.next().unwrap_or_default().to_string(),
                difficulty: iter.next().unwrap_or_default().to_string(),
            },
            Some("history") => Command::History {
                topic: iter.next().map(Topic::from_id),
            },
            Some("clear-history") => Command::ClearHistory,
            Some("lang") => match iter.next() {
                Some(code @ ("en" | "ar")) => Command::SetLanguage(Language::from_code(code)),
                other => {
                    return Err(ConfigError::InvalidCommand(format!(
                        "lang 需要 en 或 ar，收到 {:?}",
                        other
                    ))
                    .into())
                }
            },
            Some("topics") => Command::Topics,
            Some(other) => {
                return Err(ConfigError::InvalidCommand(other.to_string()).into());
            }
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_raw_strings() {
        let command = Command::parse(["play", "history", "hard"]).unwrap();
        assert_eq!(
            command,
            Command::Play {
                topic: "history".to_string(),
                difficulty: "hard".to_string()
            }
        );
        let missing = Command::parse(["play"]).unwrap();
        assert_eq!(
            missing,
            Command::Play {
                topic: String::new(),
                difficulty: String::new()
            }
        );
    }

    #[test]
    fn parses_other_commands() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Help);
        assert_eq!(
            Command::parse(["history", "history"]).unwrap(),
            Command::History {
                topic: Some(Topic::History)
            }
        );
        assert_eq!(
            Command::parse(["lang", "ar"]).unwrap(),
            Command::SetLanguage(Language::Arabic)
        );
        assert_eq!(Command::parse(["clear-history"]).unwrap(), Command::ClearHistory);
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(Command::parse(["dance"]).is_err());
        assert!(Command::parse(["lang", "fr"]).is_err());
    }
}
