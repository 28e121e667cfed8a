//! 单题的打乱展示
//!
//! 每次访问题目都重新生成一个选项排列，并按正确答案的*文本*
//! 在排列后的列表中重新定位正确索引。

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::models::{Language, Question};

/// 一道题本次访问的选项排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledPresentation {
    /// `order[i]` 为展示位置 i 上的原始选项索引
    order: Vec<usize>,
    /// 正确答案在展示列表中的位置
    correct_index: usize,
}

impl ShuffledPresentation {
    /// 为题目生成新的均匀随机排列
    ///
    /// 正确索引按 `language` 下的文本定位。若同一题中存在重复文本，
    /// 取第一个匹配项，可能与原始正确选项不是同一位置。
    pub fn shuffle<R: Rng + ?Sized>(question: &Question, language: Language, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..question.options(language).len()).collect();
        order.shuffle(rng);

        if question.has_duplicate_options(language) {
            warn!(
                "⚠️ 题目 {} 存在重复选项文本 ({})，正确答案按首个匹配定位",
                question.id, language
            );
        }

        let options = question.options(language);
        let correct_text = question.correct_text(language);
        let correct_index = order
            .iter()
            .position(|&original| Some(options[original].as_str()) == correct_text)
            .unwrap_or(0);

        Self {
            order,
            correct_index,
        }
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 按排列顺序给出指定语言的选项
    pub fn options<'q>(&self, question: &'q Question, language: Language) -> Vec<&'q str> {
        let options = question.options(language);
        self.order
            .iter()
            .filter_map(|&original| options.get(original).map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::fixtures::question;
    use crate::models::{Difficulty, Topic};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn correct_index_points_at_correct_text() {
        let mut rng = StdRng::seed_from_u64(7);
        for correct in 0..4 {
            let q = question("q", Topic::Culture, Difficulty::Easy, correct);
            for _ in 0..50 {
                let presentation = ShuffledPresentation::shuffle(&q, Language::English, &mut rng);
                let options = presentation.options(&q, Language::English);
                assert_eq!(
                    Some(options[presentation.correct_index()]),
                    q.correct_text(Language::English)
                );
                let arabic = presentation.options(&q, Language::Arabic);
                assert_eq!(
                    Some(arabic[presentation.correct_index()]),
                    q.correct_text(Language::Arabic)
                );
            }
        }
    }

    #[test]
    fn order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let q = question("q", Topic::History, Difficulty::Hard, 1);
        let presentation = ShuffledPresentation::shuffle(&q, Language::Arabic, &mut rng);
        let mut order = presentation.order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn correct_position_varies_across_visits() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = question("q", Topic::Culture, Difficulty::Easy, 0);
        let positions: std::collections::HashSet<usize> = (0..100)
            .map(|_| ShuffledPresentation::shuffle(&q, Language::English, &mut rng).correct_index())
            .collect();
        assert!(positions.len() > 1);
    }

    #[test]
    fn duplicate_text_locates_first_match() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut q = question("dup", Topic::Culture, Difficulty::Easy, 2);
        q.options_en[0] = q.options_en[2].clone();
        let presentation = ShuffledPresentation::shuffle(&q, Language::English, &mut rng);
        let first_match = presentation
            .order()
            .iter()
            .position(|&i| i == 0 || i == 2)
            .unwrap();
        assert_eq!(presentation.correct_index(), first_match);
    }
}
