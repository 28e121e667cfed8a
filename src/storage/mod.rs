//! 存储层
//!
//! - `QuestionStore` - 题库读取能力（按模块、按模块+难度）
//! - `HistoryLog` - 答题记录的追加与查询
//!
//! 两个 trait 各有 SQLite 实现与内存实现。

use std::future::Future;

use crate::error::AppResult;
use crate::models::{Difficulty, HistoryRecord, NewHistoryRecord, Question, Topic};

pub mod database;
pub mod history_log;
pub mod memory;
pub mod question_cache;

pub use database::Database;
pub use history_log::SqliteHistoryLog;
pub use memory::{MemoryHistoryLog, MemoryQuestionStore};
pub use question_cache::{CorpusSource, SqliteQuestionStore};

/// 默认的最近记录条数
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// 题库读取能力
///
/// 初始化成功后返回的题目均满足结构约束；空列表表示“没有可用题目”。
pub trait QuestionStore: Send + Sync {
    fn questions_for(&self, topic: Topic) -> impl Future<Output = AppResult<Vec<Question>>> + Send;

    fn questions_for_difficulty(
        &self,
        topic: Topic,
        difficulty: Difficulty,
    ) -> impl Future<Output = AppResult<Vec<Question>>> + Send;
}

/// 答题记录日志，只追加，可整体清空
pub trait HistoryLog: Send + Sync {
    /// 追加一条记录，返回自增 ID
    fn append(&self, record: NewHistoryRecord) -> impl Future<Output = AppResult<i64>> + Send;

    /// 最近的记录，按完成时间倒序
    fn recent_records(
        &self,
        limit: usize,
    ) -> impl Future<Output = AppResult<Vec<HistoryRecord>>> + Send;

    /// 指定模块的全部记录，按完成时间倒序
    fn records_for_topic(
        &self,
        topic: Topic,
    ) -> impl Future<Output = AppResult<Vec<HistoryRecord>>> + Send;

    /// 删除全部记录，返回删除条数
    fn clear(&self) -> impl Future<Output = AppResult<usize>> + Send;
}
