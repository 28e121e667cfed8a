//! 终端答题流程
//!
//! 驱动一个 `QuizSession` 从开始到完成：逐题显示、读取作答、
//! 完成后写入历史记录并输出得分。输入结束（EOF）视为放弃本轮。

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{Difficulty, HistoryRecord, Language, Topic};
use crate::services::QuestionSelector;
use crate::storage::{HistoryLog, QuestionStore};
use crate::utils::logging;
use crate::utils::messages::text;
use crate::workflow::{Encouragement, QuizSession, SessionError};

/// 一轮答题的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayResult {
    /// 完成并已记录
    Completed(HistoryRecord),
    /// 没有可用题目或加载失败
    Unavailable(SessionError),
    /// 中途退出
    Abandoned,
}

/// 终端答题驱动
pub struct QuizRunner<'a, S, H> {
    selector: &'a QuestionSelector<S>,
    history: &'a H,
    language: Language,
}

impl<'a, S, H> QuizRunner<'a, S, H>
where
    S: QuestionStore,
    H: HistoryLog,
{
    pub fn new(selector: &'a QuestionSelector<S>, history: &'a H, language: Language) -> Self {
        Self {
            selector,
            history,
            language,
        }
    }

    /// 进行一轮答题
    pub async fn play<R, I, O>(
        &self,
        session: &mut QuizSession<R>,
        topic: Topic,
        difficulty: Difficulty,
        input: &mut I,
        output: &mut O,
    ) -> AppResult<PlayResult>
    where
        R: Rng + Send,
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let lang = self.language;
        session.start(self.selector, topic, difficulty).await;

        if let Some(error) = session.error().cloned() {
            let line = match &error {
                SessionError::ContentUnavailable => text("error_no_questions", lang).to_string(),
                SessionError::LoadFailure(message) => format!("❌ {}", message),
            };
            write_line(output, &line).await?;
            return Ok(PlayResult::Unavailable(error));
        }

        write_line(
            output,
            &format!("📚 {} · {}", topic.title(lang), difficulty.title(lang)),
        )
        .await?;

        while session.is_active() {
            self.show_question(session, output).await?;

            let Some(choice) = self.read_choice(session, input, output).await? else {
                info!("⚠️ 输入结束，放弃本轮答题");
                return Ok(PlayResult::Abandoned);
            };
            session.select_answer(choice);

            if session.is_answer_correct() == Some(true) {
                write_line(output, text("quiz_correct", lang)).await?;
            } else {
                let correct = session.correct_answer_text(lang).unwrap_or_default();
                write_line(output, &format!("{} {}", text("quiz_wrong", lang), correct)).await?;
            }
            session.advance();
        }

        let Some(outcome) = session.outcome() else {
            return Ok(PlayResult::Abandoned);
        };

        let new_record = outcome.to_record();
        let record_id = self.history.append(new_record.clone()).await?;
        let record = HistoryRecord::from_new(record_id, new_record);
        logging::log_session_recorded(
            record_id,
            outcome.score,
            outcome.total_questions,
            outcome.percentage(),
        );

        let percentage = outcome.percentage();
        write_line(
            output,
            &format!(
                "{}: {}/{} · {}: {}%",
                text("results_score", lang),
                outcome.score,
                outcome.total_questions,
                text("results_percentage", lang),
                percentage
            ),
        )
        .await?;
        write_line(output, Encouragement::for_percentage(percentage).message(lang)).await?;

        Ok(PlayResult::Completed(record))
    }

    async fn show_question<R, O>(&self, session: &QuizSession<R>, output: &mut O) -> AppResult<()>
    where
        O: AsyncWrite + Unpin,
    {
        let lang = self.language;
        let question_text = session.question_text(lang).unwrap_or_default();
        debug!(
            "显示第 {} 题: {}",
            session.current_index() + 1,
            logging::truncate_text(question_text, 40)
        );

        write_line(
            output,
            &format!(
                "\n{} {}/{}: {}",
                text("quiz_question", lang),
                session.current_index() + 1,
                session.total_questions(),
                question_text
            ),
        )
        .await?;
        for (i, option) in session.options(lang).iter().enumerate() {
            write_line(output, &format!("  {}. {}", i + 1, option)).await?;
        }
        Ok(())
    }

    /// 读取 1 起始的选项编号，无效输入重新提示；EOF 返回 `None`
    async fn read_choice<R, I, O>(
        &self,
        session: &QuizSession<R>,
        input: &mut I,
        output: &mut O,
    ) -> AppResult<Option<usize>>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let option_count = session.options(self.language).len();
        loop {
            write_text(output, &format!("{}: ", text("quiz_prompt", self.language))).await?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .await
                .map_err(|e| AppError::file_read_failed("stdin", e))?;
            if read == 0 {
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=option_count).contains(&n) => return Ok(Some(n - 1)),
                _ => debug!("无效输入: {:?}", line.trim()),
            }
        }
    }
}

async fn write_text<O: AsyncWrite + Unpin>(output: &mut O, content: &str) -> AppResult<()> {
    output
        .write_all(content.as_bytes())
        .await
        .map_err(|e| AppError::file_write_failed("stdout", e))?;
    output
        .flush()
        .await
        .map_err(|e| AppError::file_write_failed("stdout", e))
}

pub(crate) async fn write_line<O: AsyncWrite + Unpin>(output: &mut O, line: &str) -> AppResult<()> {
    write_text(output, &format!("{}\n", line)).await
}
