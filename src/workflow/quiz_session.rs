//! 答题会话状态机 - 流程层
//!
//! 状态流转：`Loading → Active → Complete`，取题失败进入终止态 `Error`。
//! `Active` 下每道题分为未作答 / 已作答两个子状态。
//!
//! 状态机本身不做 I/O：`start` 只负责等待选题结果，
//! 真正的状态转换在同步的 `load` 中完成。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{Difficulty, Language, NewHistoryRecord, Question, Topic};
use crate::services::question_selector::{coerce, QuestionSelector};
use crate::storage::QuestionStore;
use crate::workflow::presentation::ShuffledPresentation;
use crate::workflow::scoring;

/// 会话终止错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 没有符合条件的题目
    ContentUnavailable,
    /// 题库读取失败
    LoadFailure(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::ContentUnavailable => write!(f, "no questions"),
            SessionError::LoadFailure(message) => write!(f, "{}", message),
        }
    }
}

/// 会话阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Complete,
    Error(SessionError),
}

/// 当前题目的作答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    Unanswered,
    Answered { selected: usize, correct: bool },
}

/// 会话状态快照，按值返回给展示层
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: SessionPhase,
    pub question_text: Option<String>,
    pub options: Vec<String>,
    pub current_index: usize,
    pub total_questions: usize,
    pub selected_answer: Option<usize>,
    pub is_answer_correct: Option<bool>,
    pub score: u32,
    pub is_complete: bool,
}

/// 已完成会话的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total_questions: u32,
}

impl SessionOutcome {
    pub fn percentage(&self) -> u32 {
        scoring::percentage(self.score, self.total_questions)
    }

    /// 转换为待写入的历史记录，时间为当前时间
    pub fn to_record(&self) -> NewHistoryRecord {
        NewHistoryRecord::now(self.topic, self.difficulty, self.score, self.total_questions)
    }
}

/// 一次答题会话
///
/// 所有修改操作都需要 `&mut self`，同一会话不支持并发调用。
pub struct QuizSession<R = StdRng> {
    topic: Topic,
    difficulty: Difficulty,
    display_language: Language,
    questions: Vec<Question>,
    position: usize,
    presentation: Option<ShuffledPresentation>,
    answer: AnswerState,
    score: u32,
    phase: SessionPhase,
    rng: R,
}

impl QuizSession<StdRng> {
    /// 创建会话，`display_language` 决定打乱后按哪种语言定位正确答案
    pub fn new(display_language: Language) -> Self {
        Self::with_rng(display_language, StdRng::from_entropy())
    }

    pub fn with_seed(display_language: Language, seed: u64) -> Self {
        Self::with_rng(display_language, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(display_language: Language, rng: R) -> Self {
        Self {
            topic: Topic::Culture,
            difficulty: Difficulty::Easy,
            display_language,
            questions: Vec::new(),
            position: 0,
            presentation: None,
            answer: AnswerState::Unanswered,
            score: 0,
            phase: SessionPhase::Loading,
            rng,
        }
    }

    // ========== 状态转换 ==========

    /// 开始会话：选题并进入 `Active`，无题时进入 `Error`
    pub async fn start<S: QuestionStore>(
        &mut self,
        selector: &QuestionSelector<S>,
        topic: Topic,
        difficulty: Difficulty,
    ) {
        self.begin(topic, difficulty);
        let result = selector.select(topic, difficulty).await;
        self.load(result);
    }

    /// 按原始字符串开始会话，未知值按默认值处理
    pub async fn start_raw<S: QuestionStore>(
        &mut self,
        selector: &QuestionSelector<S>,
        topic_id: &str,
        difficulty_id: &str,
    ) {
        let (topic, difficulty) = coerce(topic_id, difficulty_id);
        self.start(selector, topic, difficulty).await;
    }

    /// 重置为 `Loading`，丢弃之前的全部状态
    pub fn begin(&mut self, topic: Topic, difficulty: Difficulty) {
        self.topic = topic;
        self.difficulty = difficulty;
        self.questions.clear();
        self.position = 0;
        self.presentation = None;
        self.answer = AnswerState::Unanswered;
        self.score = 0;
        self.phase = SessionPhase::Loading;
    }

    /// 应用选题结果，仅在 `Loading` 阶段生效
    pub fn load(&mut self, result: AppResult<Vec<Question>>) {
        if self.phase != SessionPhase::Loading {
            debug!("忽略题目加载: 当前阶段 {:?}", self.phase);
            return;
        }

        match result {
            Ok(questions) if questions.is_empty() => {
                info!(
                    "⚠️ 没有可用题目: 模块 {} | 难度 {}",
                    self.topic, self.difficulty
                );
                self.phase = SessionPhase::Error(SessionError::ContentUnavailable);
            }
            Ok(questions) => {
                if let Err(e) = questions.iter().try_for_each(Question::validate) {
                    tracing::error!("❌ 题目数据无效: {}", e);
                    self.phase = SessionPhase::Error(SessionError::LoadFailure(e.to_string()));
                    return;
                }
                info!(
                    "🚀 会话开始: 模块 {} | 难度 {} | 共 {} 题",
                    self.topic,
                    self.difficulty,
                    questions.len()
                );
                self.questions = questions;
                self.position = 0;
                self.score = 0;
                self.answer = AnswerState::Unanswered;
                self.phase = SessionPhase::Active;
                self.present_current();
            }
            Err(e) => {
                tracing::error!("❌ 题目加载失败: {}", e);
                self.phase = SessionPhase::Error(SessionError::LoadFailure(e.to_string()));
            }
        }
    }

    /// 提交答案，仅在未作答时生效；返回是否被接受
    pub fn select_answer(&mut self, option_index: usize) -> bool {
        if self.phase != SessionPhase::Active || self.answer != AnswerState::Unanswered {
            debug!("忽略作答: 阶段 {:?} | 作答状态 {:?}", self.phase, self.answer);
            return false;
        }
        let Some(presentation) = &self.presentation else {
            return false;
        };

        let correct = option_index == presentation.correct_index();
        if correct {
            self.score += 1;
        }
        self.answer = AnswerState::Answered {
            selected: option_index,
            correct,
        };
        debug!(
            "第 {}/{} 题作答: 选择 {} | {}",
            self.position + 1,
            self.questions.len(),
            option_index,
            if correct { "正确" } else { "错误" }
        );
        true
    }

    /// 进入下一题，仅在已作答时生效；最后一题之后进入 `Complete`
    pub fn advance(&mut self) -> bool {
        if self.phase != SessionPhase::Active || self.answer == AnswerState::Unanswered {
            debug!("忽略前进: 阶段 {:?} | 作答状态 {:?}", self.phase, self.answer);
            return false;
        }

        if self.position + 1 == self.questions.len() {
            self.phase = SessionPhase::Complete;
            info!(
                "✅ 会话完成: 得分 {}/{} ({}%)",
                self.score,
                self.questions.len(),
                self.percentage()
            );
            return true;
        }

        self.position += 1;
        self.answer = AnswerState::Unanswered;
        self.present_current();
        true
    }

    /// 重新进入当前题目时重新打乱选项，仅在未作答时生效
    pub fn reshuffle(&mut self) -> bool {
        if self.phase != SessionPhase::Active || self.answer != AnswerState::Unanswered {
            return false;
        }
        self.present_current();
        true
    }

    fn present_current(&mut self) {
        self.presentation = self.questions.get(self.position).map(|question| {
            ShuffledPresentation::shuffle(question, self.display_language, &mut self.rng)
        });
    }
}

impl<R> QuizSession<R> {
    // ========== 查询 ==========

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn display_language(&self) -> Language {
        self.display_language
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn error(&self) -> Option<&SessionError> {
        match &self.phase {
            SessionPhase::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn answer_state(&self) -> AnswerState {
        self.answer
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.answer, AnswerState::Answered { .. })
    }

    pub fn selected_answer(&self) -> Option<usize> {
        match self.answer {
            AnswerState::Answered { selected, .. } => Some(selected),
            AnswerState::Unanswered => None,
        }
    }

    pub fn is_answer_correct(&self) -> Option<bool> {
        match self.answer {
            AnswerState::Answered { correct, .. } => Some(correct),
            AnswerState::Unanswered => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 当前题目序号（从 0 开始）
    pub fn current_index(&self) -> usize {
        self.position
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn percentage(&self) -> u32 {
        scoring::percentage(self.score, self.questions.len() as u32)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Active | SessionPhase::Complete => self.questions.get(self.position),
            _ => None,
        }
    }

    pub fn question_text(&self, language: Language) -> Option<&str> {
        self.current_question().map(|q| q.question(language))
    }

    /// 当前题目打乱后的选项
    pub fn options(&self, language: Language) -> Vec<&str> {
        match (self.current_question(), &self.presentation) {
            (Some(question), Some(presentation)) => presentation.options(question, language),
            _ => Vec::new(),
        }
    }

    /// 当前题目在打乱后列表中的正确位置
    pub fn correct_index(&self) -> Option<usize> {
        self.current_question()
            .and(self.presentation.as_ref())
            .map(ShuffledPresentation::correct_index)
    }

    pub fn correct_answer_text(&self, language: Language) -> Option<&str> {
        self.current_question().and_then(|q| q.correct_text(language))
    }

    /// 会话完成后的结果
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.is_complete().then(|| SessionOutcome {
            topic: self.topic,
            difficulty: self.difficulty,
            score: self.score,
            total_questions: self.questions.len() as u32,
        })
    }

    pub fn snapshot(&self, language: Language) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase.clone(),
            question_text: self.question_text(language).map(str::to_string),
            options: self
                .options(language)
                .into_iter()
                .map(str::to_string)
                .collect(),
            current_index: self.position,
            total_questions: self.questions.len(),
            selected_answer: self.selected_answer(),
            is_answer_correct: self.is_answer_correct(),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::question::fixtures::question;

    fn loaded(count: usize) -> QuizSession {
        let mut session = QuizSession::with_seed(Language::English, 9);
        session.begin(Topic::Culture, Difficulty::Easy);
        session.load(Ok((0..count)
            .map(|i| question(&format!("q{}", i), Topic::Culture, Difficulty::Easy, i % 4))
            .collect()));
        session
    }

    fn wrong_index(session: &QuizSession) -> usize {
        (session.correct_index().unwrap() + 1) % session.options(Language::English).len()
    }

    #[test]
    fn new_session_is_loading() {
        let session = QuizSession::new(Language::Arabic);
        assert_eq!(session.phase(), &SessionPhase::Loading);
        assert!(session.options(Language::Arabic).is_empty());
        assert_eq!(session.question_text(Language::Arabic), None);
    }

    #[test]
    fn load_enters_active_at_first_question() {
        let session = loaded(3);
        assert!(session.is_active());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.total_questions(), 3);
        assert_eq!(session.score(), 0);
        assert!(!session.is_answered());
        assert_eq!(session.options(Language::English).len(), 4);
    }

    #[test]
    fn invalid_question_is_load_failure() {
        let mut session = QuizSession::with_seed(Language::English, 3);
        session.begin(Topic::Culture, Difficulty::Easy);
        let mut bad = question("bad", Topic::Culture, Difficulty::Easy, 0);
        bad.correct_answer = 7;
        session.load(Ok(vec![question("ok", Topic::Culture, Difficulty::Easy, 1), bad]));

        assert!(matches!(
            session.phase(),
            SessionPhase::Error(SessionError::LoadFailure(_))
        ));
        assert_eq!(session.correct_index(), None);
        assert!(!session.select_answer(0));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn empty_result_is_content_unavailable() {
        let mut session = QuizSession::with_seed(Language::English, 1);
        session.begin(Topic::History, Difficulty::Hard);
        session.load(Ok(Vec::new()));
        assert_eq!(session.error(), Some(&SessionError::ContentUnavailable));
        assert!(!session.is_complete());
        assert!(!session.select_answer(0));
        assert!(!session.advance());
    }

    #[test]
    fn load_failure_is_terminal_error() {
        let mut session = QuizSession::with_seed(Language::English, 1);
        session.load(Err(AppError::Other("disk on fire".to_string())));
        match session.error() {
            Some(SessionError::LoadFailure(message)) => assert!(message.contains("disk on fire")),
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn load_is_ignored_outside_loading() {
        let mut session = loaded(2);
        session.load(Ok(Vec::new()));
        assert!(session.is_active());
        assert_eq!(session.total_questions(), 2);
    }

    #[test]
    fn second_answer_is_refused() {
        let mut session = loaded(2);
        let correct = session.correct_index().unwrap();
        assert!(session.select_answer(correct));
        assert_eq!(session.score(), 1);
        assert!(!session.select_answer(correct));
        assert!(!session.select_answer(wrong_index(&session)));
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_answer(), Some(correct));
        assert_eq!(session.is_answer_correct(), Some(true));
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = loaded(2);
        assert!(!session.advance());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn wrong_and_out_of_range_answers_do_not_score() {
        let mut session = loaded(2);
        let wrong = wrong_index(&session);
        assert!(session.select_answer(wrong));
        assert_eq!(session.score(), 0);
        assert_eq!(session.is_answer_correct(), Some(false));
        assert!(session.advance());

        assert!(session.select_answer(99));
        assert_eq!(session.is_answer_correct(), Some(false));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn advance_clears_answer_and_completes_after_last() {
        let mut session = loaded(2);
        session.select_answer(0);
        assert!(session.advance());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.is_answer_correct(), None);

        session.select_answer(0);
        assert!(session.advance());
        assert!(session.is_complete());
        assert!(!session.advance());
        assert!(!session.select_answer(0));

        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.total_questions, 2);
        assert_eq!(outcome.score, session.score());
    }

    #[test]
    fn shuffled_correct_text_matches_across_languages() {
        let mut session = loaded(6);
        while session.is_active() {
            let correct = session.correct_index().unwrap();
            for language in [Language::English, Language::Arabic] {
                assert_eq!(
                    Some(session.options(language)[correct]),
                    session.correct_answer_text(language)
                );
            }
            session.select_answer(correct);
            session.advance();
        }
        assert_eq!(session.score(), 6);
        assert_eq!(session.percentage(), 100);
    }

    #[test]
    fn reshuffle_only_before_answering() {
        let mut session = loaded(1);
        assert!(session.reshuffle());
        let correct = session.correct_index().unwrap();
        assert_eq!(
            Some(session.options(Language::English)[correct]),
            session.correct_answer_text(Language::English)
        );
        session.select_answer(correct);
        let before = session.options(Language::English);
        let before: Vec<String> = before.into_iter().map(str::to_string).collect();
        assert!(!session.reshuffle());
        let after: Vec<String> = session
            .options(Language::English)
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn snapshot_reflects_state_by_value() {
        let mut session = loaded(3);
        let snapshot = session.snapshot(Language::Arabic);
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.total_questions, 3);
        assert!(snapshot.question_text.unwrap().starts_with("سؤال"));
        assert!(snapshot.options.iter().all(|o| o.starts_with("ar-")));

        session.select_answer(0);
        let snapshot = session.snapshot(Language::English);
        assert_eq!(snapshot.selected_answer, Some(0));
        assert!(snapshot.is_answer_correct.is_some());
        assert!(!snapshot.is_complete);
    }

    #[test]
    fn begin_discards_previous_session() {
        let mut session = loaded(2);
        session.select_answer(session.correct_index().unwrap());
        session.begin(Topic::History, Difficulty::Moderate);
        assert_eq!(session.phase(), &SessionPhase::Loading);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_questions(), 0);
        assert_eq!(session.topic(), Topic::History);
    }
}
