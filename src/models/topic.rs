use crate::models::Language;

/// 题库模块枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// 文化
    Culture,
    /// 历史
    History,
}

impl Topic {
    /// 全部模块，按展示顺序
    pub const ALL: [Topic; 2] = [Topic::Culture, Topic::History];

    /// 获取存储用的模块标识
    pub fn id(self) -> &'static str {
        match self {
            Topic::Culture => "culture",
            Topic::History => "history",
        }
    }

    /// 获取内置的展示名称
    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Topic::Culture, Language::English) => "Culture",
            (Topic::Culture, Language::Arabic) => "الثقافة",
            (Topic::History, Language::English) => "History",
            (Topic::History, Language::Arabic) => "التاريخ",
        }
    }

    /// 精确解析模块标识
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "culture" => Some(Topic::Culture),
            "history" => Some(Topic::History),
            _ => None,
        }
    }

    /// 解析模块标识，未知值回退为 `Culture`
    pub fn from_id(id: &str) -> Self {
        Self::parse(id).unwrap_or(Topic::Culture)
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 难度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单
    Easy,
    /// 中等
    Moderate,
    /// 困难
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }

    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Difficulty::Easy, Language::English) => "Easy",
            (Difficulty::Easy, Language::Arabic) => "سهل",
            (Difficulty::Moderate, Language::English) => "Moderate",
            (Difficulty::Moderate, Language::Arabic) => "متوسط",
            (Difficulty::Hard, Language::English) => "Hard",
            (Difficulty::Hard, Language::Arabic) => "صعب",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 解析难度标识，未知值回退为 `Easy`
    pub fn from_id(id: &str) -> Self {
        Self::parse(id).unwrap_or(Difficulty::Easy)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_fall_back_to_defaults() {
        assert_eq!(Topic::from_id("geography"), Topic::Culture);
        assert_eq!(Topic::from_id(""), Topic::Culture);
        assert_eq!(Difficulty::from_id("insane"), Difficulty::Easy);
    }

    #[test]
    fn known_ids_parse_case_insensitively() {
        assert_eq!(Topic::from_id("HISTORY"), Topic::History);
        assert_eq!(Difficulty::from_id(" Moderate "), Difficulty::Moderate);
        for topic in Topic::ALL {
            assert_eq!(Topic::parse(topic.id()), Some(topic));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::parse(difficulty.id()), Some(difficulty));
        }
    }
}
