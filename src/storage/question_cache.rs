//! 题库本地缓存
//!
//! 首次运行或内置题库版本变化时，清空缓存并重新写入整套题库。

use std::sync::atomic::{AtomicBool, Ordering};

use rusqlite::{params, Connection};
use tracing::info;

use crate::error::{AppError, AppResult, StorageError};
use crate::models::loaders::CURRENT_CORPUS_VERSION;
use crate::models::{load_bundled_corpus, load_corpus_dir, Corpus, Difficulty, Question, Topic};
use crate::storage::database::{read_meta, write_meta, Database};
use crate::storage::QuestionStore;
use crate::utils::logging;

const CORPUS_VERSION_KEY: &str = "corpus_version";

/// 题库数据来源
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// 编译进程序的内置题库
    Bundled,
    /// 磁盘上的题库目录
    Directory(String),
    /// 直接提供的题库
    Inline(Corpus),
}

impl CorpusSource {
    async fn load(&self) -> AppResult<Corpus> {
        match self {
            CorpusSource::Bundled => load_bundled_corpus(),
            CorpusSource::Directory(dir) => load_corpus_dir(dir).await,
            CorpusSource::Inline(corpus) => Ok(corpus.clone()),
        }
    }
}

/// SQLite 题库缓存
pub struct SqliteQuestionStore {
    db: Database,
    source: CorpusSource,
    corpus_version: i64,
    initialized: AtomicBool,
}

impl SqliteQuestionStore {
    pub fn new(db: Database, source: CorpusSource) -> Self {
        Self {
            db,
            source,
            corpus_version: CURRENT_CORPUS_VERSION,
            initialized: AtomicBool::new(false),
        }
    }

    /// 覆盖期望的题库版本
    pub fn with_version(mut self, version: i64) -> Self {
        self.corpus_version = version;
        self
    }

    /// 确保缓存与当前题库版本一致
    ///
    /// 返回本次是否重新写入了题库。
    pub async fn initialize(&self) -> AppResult<bool> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(false);
        }

        let expected = self.corpus_version;
        let (stored_version, count) = self
            .db
            .call(|conn| {
                let version = read_meta(conn, CORPUS_VERSION_KEY)?.unwrap_or(0);
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
                Ok((version, count))
            })
            .await?;

        if count > 0 && stored_version == expected {
            self.initialized.store(true, Ordering::Release);
            return Ok(false);
        }

        info!(
            "📁 题库缓存需要重建 (已存版本: {}, 当前版本: {}, 已存题目: {})",
            stored_version, expected, count
        );

        let corpus = self.source.load().await?;
        corpus.validate()?;
        for (topic, title_en, title_ar) in &corpus.titles {
            tracing::debug!("模块 {}: {} / {}", topic, title_en, title_ar);
        }
        let total = corpus.questions.len();

        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM questions", [])?;
                for question in &corpus.questions {
                    insert_question(&tx, question)?;
                }
                write_meta(&tx, CORPUS_VERSION_KEY, expected)?;
                tx.commit()?;
                Ok(())
            })
            .await?;

        logging::log_corpus_loaded(total, expected);
        self.initialized.store(true, Ordering::Release);
        Ok(true)
    }

    /// 缓存中的题目总数
    pub async fn question_count(&self) -> AppResult<usize> {
        self.initialize().await?;
        self.db
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
                Ok(count as usize)
            })
            .await
    }
}

impl QuestionStore for SqliteQuestionStore {
    async fn questions_for(&self, topic: Topic) -> AppResult<Vec<Question>> {
        self.initialize().await?;
        self.db
            .call(move |conn| {
                query_questions(
                    conn,
                    "SELECT * FROM questions WHERE topic = ?1 ORDER BY id",
                    &[topic.id()],
                )
            })
            .await
    }

    async fn questions_for_difficulty(
        &self,
        topic: Topic,
        difficulty: Difficulty,
    ) -> AppResult<Vec<Question>> {
        self.initialize().await?;
        self.db
            .call(move |conn| {
                query_questions(
                    conn,
                    "SELECT * FROM questions WHERE topic = ?1 AND difficulty = ?2 ORDER BY id",
                    &[topic.id(), difficulty.id()],
                )
            })
            .await
    }
}

fn insert_question(conn: &Connection, question: &Question) -> AppResult<()> {
    let options_ar = serde_json::to_string(&question.options_ar).map_err(|source| {
        StorageError::CorruptOptions {
            id: question.id.clone(),
            source,
        }
    })?;
    let options_en = serde_json::to_string(&question.options_en).map_err(|source| {
        StorageError::CorruptOptions {
            id: question.id.clone(),
            source,
        }
    })?;

    conn.execute(
        "INSERT INTO questions
         (id, topic, difficulty, category, question_ar, question_en, options_ar, options_en, correct_answer)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            question.id,
            question.topic.id(),
            question.difficulty.id(),
            question.category,
            question.question_ar,
            question.question_en,
            options_ar,
            options_en,
            question.correct_answer as i64,
        ],
    )?;
    Ok(())
}

/// 数据库中的原始行
struct QuestionRow {
    id: String,
    topic: String,
    difficulty: String,
    category: String,
    question_ar: String,
    question_en: String,
    options_ar: String,
    options_en: String,
    correct_answer: i64,
}

impl QuestionRow {
    fn into_question(self) -> AppResult<Question> {
        let parse = |raw: &str| -> AppResult<Vec<String>> {
            serde_json::from_str(raw).map_err(|source| {
                StorageError::CorruptOptions {
                    id: self.id.clone(),
                    source,
                }
                .into()
            })
        };
        let options_ar = parse(&self.options_ar)?;
        let options_en = parse(&self.options_en)?;

        let topic = Topic::parse(&self.topic).ok_or_else(|| {
            AppError::invalid_question(&self.id, format!("未知模块 {}", self.topic))
        })?;
        let difficulty = Difficulty::parse(&self.difficulty).ok_or_else(|| {
            AppError::invalid_question(&self.id, format!("未知难度 {}", self.difficulty))
        })?;
        let correct_answer = usize::try_from(self.correct_answer).map_err(|_| {
            AppError::invalid_question(
                &self.id,
                format!("正确答案索引 {} 为负数", self.correct_answer),
            )
        })?;

        let question = Question {
            topic,
            difficulty,
            category: self.category,
            question_ar: self.question_ar,
            question_en: self.question_en,
            options_ar,
            options_en,
            correct_answer,
            id: self.id,
        };
        question.validate()?;
        Ok(question)
    }
}

fn query_questions(conn: &Connection, sql: &str, args: &[&str]) -> AppResult<Vec<Question>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), |row| {
        Ok(QuestionRow {
            id: row.get("id")?,
            topic: row.get("topic")?,
            difficulty: row.get("difficulty")?,
            category: row.get("category")?,
            question_ar: row.get("question_ar")?,
            question_en: row.get("question_en")?,
            options_ar: row.get("options_ar")?,
            options_en: row.get("options_en")?,
            correct_answer: row.get("correct_answer")?,
        })
    })?;

    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?.into_question()?);
    }
    Ok(questions)
}
