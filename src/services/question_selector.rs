//! 选题服务 - 业务能力层
//!
//! 只负责“按模块+难度取题并打乱顺序”，不关心答题流程

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{Difficulty, Question, Topic};
use crate::storage::QuestionStore;

/// 选题服务
///
/// 每次调用都重新生成一个均匀随机的题目顺序。
pub struct QuestionSelector<S> {
    store: S,
    rng: Mutex<StdRng>,
}

impl<S: QuestionStore> QuestionSelector<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 使用固定种子，便于复现题目顺序
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 取出指定模块和难度的题目，随机排序
    ///
    /// 空列表表示没有可用题目，不是错误。
    pub async fn select(&self, topic: Topic, difficulty: Difficulty) -> AppResult<Vec<Question>> {
        let mut questions = self.store.questions_for_difficulty(topic, difficulty).await?;
        self.shuffle(&mut questions);
        debug!(
            "选题完成: 模块 {} | 难度 {} | 共 {} 题",
            topic,
            difficulty,
            questions.len()
        );
        Ok(questions)
    }

    /// 按原始字符串选题，未知模块回退为文化，未知难度回退为简单
    pub async fn select_raw(&self, topic_id: &str, difficulty_id: &str) -> AppResult<Vec<Question>> {
        let (topic, difficulty) = coerce(topic_id, difficulty_id);
        self.select(topic, difficulty).await
    }

    fn shuffle(&self, questions: &mut [Question]) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        questions.shuffle(&mut *rng);
    }
}

/// 将原始字符串转换为模块与难度，未知值记录日志后回退
pub fn coerce(topic_id: &str, difficulty_id: &str) -> (Topic, Difficulty) {
    let topic = Topic::from_id(topic_id);
    if Topic::parse(topic_id).is_none() {
        info!("未知模块 '{}'，使用默认模块 {}", topic_id, topic);
    }
    let difficulty = Difficulty::from_id(difficulty_id);
    if Difficulty::parse(difficulty_id).is_none() {
        info!("未知难度 '{}'，使用默认难度 {}", difficulty_id, difficulty);
    }
    (topic, difficulty)
}
