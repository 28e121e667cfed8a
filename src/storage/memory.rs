use std::sync::Mutex;

use crate::error::AppResult;
use crate::models::{Corpus, Difficulty, HistoryRecord, NewHistoryRecord, Question, Topic};
use crate::storage::{HistoryLog, QuestionStore};

/// 内存题库，不做持久化
#[derive(Debug, Clone, Default)]
pub struct MemoryQuestionStore {
    questions: Vec<Question>,
}

impl MemoryQuestionStore {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn from_corpus(corpus: Corpus) -> Self {
        Self::new(corpus.questions)
    }
}

impl QuestionStore for MemoryQuestionStore {
    async fn questions_for(&self, topic: Topic) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| q.topic == topic)
            .cloned()
            .collect())
    }

    async fn questions_for_difficulty(
        &self,
        topic: Topic,
        difficulty: Difficulty,
    ) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| q.topic == topic && q.difficulty == difficulty)
            .cloned()
            .collect())
    }
}

/// 内存答题记录
#[derive(Debug, Default)]
pub struct MemoryHistoryLog {
    inner: Mutex<MemoryHistory>,
}

#[derive(Debug, Default)]
struct MemoryHistory {
    last_id: i64,
    records: Vec<HistoryRecord>,
}

impl MemoryHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        records
    }
}

impl HistoryLog for MemoryHistoryLog {
    async fn append(&self, record: NewHistoryRecord) -> AppResult<i64> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.last_id += 1;
        let id = inner.last_id;
        inner.records.push(HistoryRecord::from_new(id, record));
        Ok(id)
    }

    async fn recent_records(&self, limit: usize) -> AppResult<Vec<HistoryRecord>> {
        let records = self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .clone();
        let mut sorted = Self::sorted(records);
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn records_for_topic(&self, topic: Topic) -> AppResult<Vec<HistoryRecord>> {
        let records: Vec<HistoryRecord> = self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .iter()
            .filter(|r| r.topic == topic)
            .cloned()
            .collect();
        Ok(Self::sorted(records))
    }

    async fn clear(&self) -> AppResult<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let removed = inner.records.len();
        inner.records.clear();
        Ok(removed)
    }
}
