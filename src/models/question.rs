use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Difficulty, Language, Topic};

/// 双语选择题
///
/// `correct_answer` 指向存储顺序（未打乱）的选项列表。
/// 两种语言的选项按位置一一对应。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub category: String,
    pub question_ar: String,
    pub question_en: String,
    pub options_ar: Vec<String>,
    pub options_en: Vec<String>,
    pub correct_answer: usize,
}

impl Question {
    /// 获取指定语言的题干
    pub fn question(&self, language: Language) -> &str {
        match language {
            Language::Arabic => &self.question_ar,
            Language::English => &self.question_en,
        }
    }

    /// 获取指定语言的选项（存储顺序）
    pub fn options(&self, language: Language) -> &[String] {
        match language {
            Language::Arabic => &self.options_ar,
            Language::English => &self.options_en,
        }
    }

    /// 获取指定语言的正确答案文本
    pub fn correct_text(&self, language: Language) -> Option<&str> {
        self.options(language)
            .get(self.correct_answer)
            .map(String::as_str)
    }

    /// 校验结构约束：选项非空、双语长度一致、正确答案索引在范围内
    pub fn validate(&self) -> AppResult<()> {
        if self.options_en.is_empty() {
            return Err(AppError::invalid_question(&self.id, "选项列表为空"));
        }
        if self.options_en.len() != self.options_ar.len() {
            return Err(AppError::invalid_question(
                &self.id,
                format!(
                    "双语选项数量不一致 (en: {}, ar: {})",
                    self.options_en.len(),
                    self.options_ar.len()
                ),
            ));
        }
        if self.correct_answer >= self.options_en.len() {
            return Err(AppError::invalid_question(
                &self.id,
                format!(
                    "正确答案索引 {} 超出范围 [0, {})",
                    self.correct_answer,
                    self.options_en.len()
                ),
            ));
        }
        Ok(())
    }

    /// 指定语言下是否存在重复的选项文本
    pub fn has_duplicate_options(&self, language: Language) -> bool {
        let options = self.options(language);
        options
            .iter()
            .enumerate()
            .any(|(i, a)| options[i + 1..].iter().any(|b| a == b))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 构造测试题，英文与阿拉伯文选项分别加前缀
    pub fn question(id: &str, topic: Topic, difficulty: Difficulty, correct: usize) -> Question {
        let options: Vec<&str> = vec!["alpha", "beta", "gamma", "delta"];
        Question {
            id: id.to_string(),
            topic,
            difficulty,
            category: "general".to_string(),
            question_ar: format!("سؤال {}", id),
            question_en: format!("Question {}", id),
            options_ar: options.iter().map(|o| format!("ar-{}", o)).collect(),
            options_en: options.iter().map(|o| format!("en-{}", o)).collect(),
            correct_answer: correct,
        }
    }
}
