use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Topic};
use crate::workflow::scoring;

/// 待写入的答题记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHistoryRecord {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total_questions: u32,
    /// 完成时间（UTC 毫秒时间戳）
    pub timestamp: i64,
}

impl NewHistoryRecord {
    /// 以当前时间创建记录
    pub fn now(topic: Topic, difficulty: Difficulty, score: u32, total_questions: u32) -> Self {
        Self {
            topic,
            difficulty,
            score,
            total_questions,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// 已持久化的答题记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total_questions: u32,
    pub timestamp: i64,
}

impl HistoryRecord {
    pub fn from_new(id: i64, record: NewHistoryRecord) -> Self {
        Self {
            id,
            topic: record.topic,
            difficulty: record.difficulty,
            score: record.score,
            total_questions: record.total_questions,
            timestamp: record.timestamp,
        }
    }

    pub fn percentage(&self) -> u32 {
        scoring::percentage(self.score, self.total_questions)
    }

    /// 本地时间格式的完成时间
    pub fn completed_at(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}
