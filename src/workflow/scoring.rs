//! 得分计算与评语分级

use crate::models::Language;
use crate::utils::messages;

/// 完成百分比，整数除法向下取整；总数为 0 时返回 0
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((u64::from(score) * 100) / u64::from(total)) as u32
}

/// 结果页评语等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encouragement {
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl Encouragement {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 80 => Encouragement::Excellent,
            p if p >= 60 => Encouragement::Great,
            p if p >= 40 => Encouragement::Good,
            _ => Encouragement::KeepTrying,
        }
    }

    /// 文案键
    pub fn message_key(self) -> &'static str {
        match self {
            Encouragement::Excellent => "results_excellent",
            Encouragement::Great => "results_great",
            Encouragement::Good => "results_good",
            Encouragement::KeepTrying => "results_keep_trying",
        }
    }

    pub fn message(self, language: Language) -> &'static str {
        messages::text(self.message_key(), language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_uses_integer_division() {
        assert_eq!(percentage(3, 4), 75);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn percentage_of_empty_session_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(7, 0), 0);
    }

    #[test]
    fn encouragement_thresholds() {
        assert_eq!(Encouragement::for_percentage(100), Encouragement::Excellent);
        assert_eq!(Encouragement::for_percentage(80), Encouragement::Excellent);
        assert_eq!(Encouragement::for_percentage(79), Encouragement::Great);
        assert_eq!(Encouragement::for_percentage(60), Encouragement::Great);
        assert_eq!(Encouragement::for_percentage(40), Encouragement::Good);
        assert_eq!(Encouragement::for_percentage(39), Encouragement::KeepTrying);
        assert_eq!(Encouragement::for_percentage(0), Encouragement::KeepTrying);
    }

    #[test]
    fn every_tier_has_bilingual_text() {
        for tier in [
            Encouragement::Excellent,
            Encouragement::Great,
            Encouragement::Good,
            Encouragement::KeepTrying,
        ] {
            assert!(!tier.message(Language::English).is_empty());
            assert_ne!(
                tier.message(Language::English),
                tier.message(Language::Arabic)
            );
        }
    }
}
