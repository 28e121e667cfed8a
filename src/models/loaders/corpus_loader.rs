use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;

use crate::error::{AppError, AppResult, ContentError, FileError};
use crate::models::{Difficulty, Question, Topic};

/// 当前内置题库版本，新增或修改题目时递增
pub const CURRENT_CORPUS_VERSION: i64 = 2;

/// 内置题库文档（文件名, 内容）
pub const BUNDLED_DOCUMENTS: [(&str, &str); 2] = [
    (
        "questions/culture.json",
        include_str!("../../../data/questions/culture.json"),
    ),
    (
        "questions/history.json",
        include_str!("../../../data/questions/history.json"),
    ),
];

/// 题库文档：一个模块一个文件
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDocument {
    pub module: String,
    pub title_ar: String,
    pub title_en: String,
    pub questions: Vec<QuestionRecord>,
}

/// 文档中的单个题目记录，未知字段忽略
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub question_ar: String,
    pub question_en: String,
    pub options_ar: Vec<String>,
    pub options_en: Vec<String>,
    pub correct_answer: usize,
    pub difficulty: String,
    pub category: String,
}

impl ModuleDocument {
    /// 文档所属模块，未知标签视为内容错误
    pub fn topic(&self) -> AppResult<Topic> {
        Topic::parse(&self.module).ok_or_else(|| {
            ContentError::UnknownLabel {
                field: "模块",
                value: self.module.clone(),
            }
            .into()
        })
    }

    /// 转换为领域模型并校验每道题
    pub fn into_questions(self) -> AppResult<Vec<Question>> {
        let topic = self.topic()?;
        self.questions
            .into_iter()
            .map(|record| {
                let difficulty = Difficulty::parse(&record.difficulty).ok_or_else(|| {
                    AppError::from(ContentError::UnknownLabel {
                        field: "难度",
                        value: record.difficulty.clone(),
                    })
                })?;
                let question = Question {
                    id: record.id,
                    topic,
                    difficulty,
                    category: record.category,
                    question_ar: record.question_ar,
                    question_en: record.question_en,
                    options_ar: record.options_ar,
                    options_en: record.options_en,
                    correct_answer: record.correct_answer,
                };
                question.validate()?;
                Ok(question)
            })
            .collect()
    }
}

/// 已加载的题库
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub questions: Vec<Question>,
    /// 模块标题（模块, 英文, 阿拉伯文）
    pub titles: Vec<(Topic, String, String)>,
}

impl Corpus {
    fn push_document(&mut self, name: &str, document: ModuleDocument) -> AppResult<()> {
        let report = |e: AppError| {
            tracing::warn!("题库文档 {} 校验失败: {}", name, e);
            e
        };
        let topic = document.topic().map_err(report)?;
        let title = (topic, document.title_en.clone(), document.title_ar.clone());
        let questions = document.into_questions().map_err(report)?;
        self.titles.push(title);
        self.questions.extend(questions);
        Ok(())
    }

    /// 校验全部题目的结构约束与 ID 唯一性
    pub fn validate(&self) -> AppResult<()> {
        for question in &self.questions {
            question.validate()?;
        }
        self.ensure_unique_ids()
    }

    /// 检查全库题目 ID 唯一
    fn ensure_unique_ids(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    id: question.id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// 解析单个 JSON 题库文档
pub fn parse_document(name: &str, content: &str) -> AppResult<ModuleDocument> {
    serde_json::from_str(content).map_err(|source| {
        AppError::File(FileError::JsonParseFailed {
            path: name.to_string(),
            source,
        })
    })
}

/// 加载编译进程序的内置题库
pub fn load_bundled_corpus() -> AppResult<Corpus> {
    let mut corpus = Corpus::default();
    for (name, content) in BUNDLED_DOCUMENTS {
        let document = parse_document(name, content)?;
        corpus.push_document(name, document)?;
    }
    corpus.ensure_unique_ids()?;
    tracing::debug!("内置题库加载完成，共 {} 道题", corpus.questions.len());
    Ok(corpus)
}

/// 从磁盘读取单个题库文档
pub async fn load_document_file(path: &Path) -> AppResult<ModuleDocument> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    parse_document(&path.display().to_string(), &content)
}

/// 从文件夹加载所有 JSON 题库文档
///
/// 任一文档失败则整体失败，不返回部分题库。
pub async fn load_corpus_dir(folder_path: &str) -> AppResult<Corpus> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    let mut corpus = Corpus::default();
    for path in files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let document = load_document_file(&path).await?;
        let before = corpus.questions.len();
        corpus.push_document(&path.display().to_string(), document)?;
        tracing::info!("成功加载 {} 个题目", corpus.questions.len() - before);
    }
    corpus.ensure_unique_ids()?;

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "module": "history",
        "title_ar": "التاريخ",
        "title_en": "History",
        "extra_field": 42,
        "questions": [{
            "id": "h-1",
            "question_ar": "س",
            "question_en": "Q",
            "options_ar": ["أ", "ب"],
            "options_en": ["A", "B"],
            "correct_answer": 1,
            "difficulty": "hard",
            "category": "ancient",
            "source": "ignored"
        }]
    }"#;

    #[test]
    fn parses_document_and_ignores_unknown_fields() {
        let document = parse_document("valid.json", VALID).unwrap();
        let questions = document.into_questions().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].topic, Topic::History);
        assert_eq!(questions[0].difficulty, Difficulty::Hard);
        assert_eq!(questions[0].correct_text(crate::models::Language::English), Some("B"));
    }

    #[test]
    fn missing_required_field_fails_document() {
        let broken = VALID.replace(r#""correct_answer": 1,"#, "");
        let err = parse_document("broken.json", &broken).unwrap_err();
        assert!(matches!(err, AppError::File(FileError::JsonParseFailed { .. })));
    }

    #[test]
    fn out_of_range_answer_fails_document() {
        let broken = VALID.replace(r#""correct_answer": 1"#, r#""correct_answer": 2"#);
        let document = parse_document("broken.json", &broken).unwrap();
        assert!(document.into_questions().is_err());
    }

    #[test]
    fn unknown_labels_fail_document() {
        let typo = VALID.replace(r#""difficulty": "hard""#, r#""difficulty": "hrad""#);
        let err = parse_document("typo.json", &typo)
            .unwrap()
            .into_questions()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(ContentError::UnknownLabel { field: "难度", .. })
        ));

        let module = VALID.replace(r#""module": "history""#, r#""module": "histroy""#);
        let err = parse_document("module.json", &module)
            .unwrap()
            .into_questions()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(ContentError::UnknownLabel { field: "模块", .. })
        ));
    }

    #[test]
    fn duplicate_ids_fail_corpus() {
        let mut corpus = Corpus::default();
        corpus
            .push_document("a.json", parse_document("a.json", VALID).unwrap())
            .unwrap();
        corpus.validate().unwrap();
        corpus
            .push_document("b.json", parse_document("b.json", VALID).unwrap())
            .unwrap();
        let err = corpus.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(ContentError::DuplicateId { ref id }) if id == "h-1"
        ));
    }

    #[test]
    fn bundled_corpus_satisfies_invariants() {
        let corpus = load_bundled_corpus().unwrap();
        assert!(!corpus.questions.is_empty());
        assert_eq!(corpus.titles.len(), 2);
        for topic in Topic::ALL {
            assert!(corpus.questions.iter().any(|q| q.topic == topic));
        }
        for question in &corpus.questions {
            question.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn missing_directory_is_reported() {
        let err = load_corpus_dir("/definitely/not/a/corpus/dir")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::DirectoryNotFound { .. })));
    }

    #[tokio::test]
    async fn loads_documents_from_directory() {
        let dir = std::env::temp_dir().join(format!("trivia-corpus-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("history.json"), VALID).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a corpus").unwrap();

        let corpus = load_corpus_dir(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(corpus.questions.len(), 1);
        assert_eq!(corpus.titles[0].1, "History");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn shared_id_across_documents_fails_directory_load() {
        let dir = std::env::temp_dir().join(format!("trivia-corpus-dup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.json"), VALID).unwrap();
        std::fs::write(dir.join("b.json"), VALID).unwrap();

        let err = load_corpus_dir(dir.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(ContentError::DuplicateId { .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
