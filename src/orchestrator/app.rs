//! 应用入口 - 编排层
//!
//! 持有数据库、题库缓存、答题记录和设置，按命令调度。

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Difficulty, Language, Topic};
use crate::orchestrator::command::Command;
use crate::orchestrator::quiz_runner::{write_line, PlayResult, QuizRunner};
use crate::services::{QuestionSelector, SettingsService};
use crate::storage::{
    CorpusSource, Database, HistoryLog, QuestionStore, SqliteHistoryLog, SqliteQuestionStore,
};
use crate::utils::logging;
use crate::utils::messages::text;
use crate::workflow::QuizSession;

/// 应用主结构
pub struct App<S = SqliteQuestionStore, H = SqliteHistoryLog> {
    config: Config,
    language: Language,
    selector: QuestionSelector<S>,
    history: H,
    settings: SettingsService,
}

impl App {
    /// 初始化应用：打开数据库、同步题库缓存、读取语言设置
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        let db = Database::open(&config.database_path)?;
        let source = match &config.corpus_dir {
            Some(dir) => CorpusSource::Directory(dir.clone()),
            None => CorpusSource::Bundled,
        };
        let store = SqliteQuestionStore::new(db.clone(), source);
        store.initialize().await?;
        info!("✓ 本地题库共 {} 道题", store.question_count().await?);

        let history = SqliteHistoryLog::new(db);
        let settings = SettingsService::new(&config.settings_file);
        let language = settings.load().await?.language;

        Ok(Self::from_parts(config, language, store, history, settings))
    }
}

impl<S, H> App<S, H>
where
    S: QuestionStore,
    H: HistoryLog,
{
    /// 由已构建的组件组装应用
    pub fn from_parts(
        config: Config,
        language: Language,
        store: S,
        history: H,
        settings: SettingsService,
    ) -> Self {
        let selector = match config.shuffle_seed {
            Some(seed) => QuestionSelector::with_seed(store, seed),
            None => QuestionSelector::new(store),
        };
        Self {
            config,
            language,
            selector,
            history,
            settings,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// 使用标准输入输出执行命令
    pub async fn run(&self, command: Command) -> AppResult<()> {
        let mut input = BufReader::new(tokio::io::stdin());
        let mut output = tokio::io::stdout();
        self.execute(command, &mut input, &mut output).await
    }

    /// 执行命令
    pub async fn execute<I, O>(&self, command: Command, input: &mut I, output: &mut O) -> AppResult<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        match command {
            Command::Play { topic, difficulty } => {
                self.play_raw(&topic, &difficulty, input, output).await?;
            }
            Command::History { topic } => self.print_history(topic, output).await?,
            Command::ClearHistory => {
                let removed = self.history.clear().await?;
                write_line(output, &format!("🗑️ {}", removed)).await?;
            }
            Command::SetLanguage(language) => {
                self.settings.save_language(language).await?;
                write_line(output, &format!("✓ {}", language)).await?;
            }
            Command::Topics => self.print_topics(output).await?,
            Command::Help => write_line(output, Command::USAGE).await?,
        }
        Ok(())
    }

    /// 按原始字符串开始一轮答题
    pub async fn play_raw<I, O>(
        &self,
        topic_id: &str,
        difficulty_id: &str,
        input: &mut I,
        output: &mut O,
    ) -> AppResult<PlayResult>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let (topic, difficulty) = crate::services::question_selector::coerce(topic_id, difficulty_id);
        self.play(topic, difficulty, input, output).await
    }

    pub async fn play<I, O>(
        &self,
        topic: Topic,
        difficulty: Difficulty,
        input: &mut I,
        output: &mut O,
    ) -> AppResult<PlayResult>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut session = match self.config.shuffle_seed {
            Some(seed) => QuizSession::with_seed(self.language, seed),
            None => QuizSession::new(self.language),
        };
        QuizRunner::new(&self.selector, &self.history, self.language)
            .play(&mut session, topic, difficulty, input, output)
            .await
    }

    async fn print_history<O>(&self, topic: Option<Topic>, output: &mut O) -> AppResult<()>
    where
        O: AsyncWrite + Unpin,
    {
        let records = match topic {
            Some(topic) => self.history.records_for_topic(topic).await?,
            None => self.history.recent_records(self.config.history_limit).await?,
        };

        if records.is_empty() {
            return write_line(output, text("history_empty", self.language)).await;
        }

        for record in records {
            write_line(
                output,
                &format!(
                    "#{} {} | {} · {} | {}/{} ({}%)",
                    record.id,
                    record.completed_at(),
                    record.topic.title(self.language),
                    record.difficulty.title(self.language),
                    record.score,
                    record.total_questions,
                    record.percentage()
                ),
            )
            .await?;
        }
        Ok(())
    }

    async fn print_topics<O>(&self, output: &mut O) -> AppResult<()>
    where
        O: AsyncWrite + Unpin,
    {
        for topic in Topic::ALL {
            let questions = self.selector.store().questions_for(topic).await?;
            let counts: Vec<String> = Difficulty::ALL
                .iter()
                .map(|&difficulty| {
                    let count = questions.iter().filter(|q| q.difficulty == difficulty).count();
                    format!("{} {}", difficulty.title(self.language), count)
                })
                .collect();
            write_line(
                output,
                &format!(
                    "{} ({}): {}",
                    topic.title(self.language),
                    topic.id(),
                    counts.join(" · ")
                ),
            )
            .await?;
        }
        Ok(())
    }
}
