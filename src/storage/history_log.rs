use rusqlite::{params, Connection, Row};

use crate::error::AppResult;
use crate::models::{Difficulty, HistoryRecord, NewHistoryRecord, Topic};
use crate::storage::database::Database;
use crate::storage::HistoryLog;

/// SQLite 答题记录
#[derive(Clone)]
pub struct SqliteHistoryLog {
    db: Database,
}

impl SqliteHistoryLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl HistoryLog for SqliteHistoryLog {
    async fn append(&self, record: NewHistoryRecord) -> AppResult<i64> {
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO game_sessions (topic, difficulty, score, total_questions, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        record.topic.id(),
                        record.difficulty.id(),
                        record.score,
                        record.total_questions,
                        record.timestamp,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    async fn recent_records(&self, limit: usize) -> AppResult<Vec<HistoryRecord>> {
        self.db
            .call(move |conn| {
                query_records(
                    conn,
                    "SELECT * FROM game_sessions ORDER BY timestamp DESC, session_id DESC LIMIT ?1",
                    params![limit as i64],
                )
            })
            .await
    }

    async fn records_for_topic(&self, topic: Topic) -> AppResult<Vec<HistoryRecord>> {
        self.db
            .call(move |conn| {
                query_records(
                    conn,
                    "SELECT * FROM game_sessions WHERE topic = ?1
                     ORDER BY timestamp DESC, session_id DESC",
                    params![topic.id()],
                )
            })
            .await
    }

    async fn clear(&self) -> AppResult<usize> {
        self.db
            .call(|conn| Ok(conn.execute("DELETE FROM game_sessions", [])?))
            .await
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    let topic: String = row.get("topic")?;
    let difficulty: String = row.get("difficulty")?;
    Ok(HistoryRecord {
        id: row.get("session_id")?,
        topic: Topic::from_id(&topic),
        difficulty: Difficulty::from_id(&difficulty),
        score: row.get("score")?,
        total_questions: row.get("total_questions")?,
        timestamp: row.get("timestamp")?,
    })
}

fn query_records(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
) -> AppResult<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let records = stmt
        .query_map(args, map_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}
