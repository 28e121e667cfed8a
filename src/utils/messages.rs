//! 双语界面文案表

use phf::phf_map;

use crate::models::Language;

/// 文案键 → (英文, 阿拉伯文)
static MESSAGES: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "results_excellent" => ("Excellent! You really know your stuff.", "ممتاز! معلوماتك رائعة."),
    "results_great" => ("Great job!", "عمل رائع!"),
    "results_good" => ("Good effort, keep learning.", "جهد جيد، تابع التعلم."),
    "results_keep_trying" => ("Keep trying, you'll get there.", "استمر في المحاولة، ستنجح."),
    "results_score" => ("Score", "النتيجة"),
    "results_percentage" => ("Percentage", "النسبة"),
    "quiz_question" => ("Question", "السؤال"),
    "quiz_correct" => ("Correct!", "إجابة صحيحة!"),
    "quiz_wrong" => ("Wrong. The correct answer is", "إجابة خاطئة. الإجابة الصحيحة هي"),
    "quiz_prompt" => ("Your answer (number)", "إجابتك (رقم)"),
    "error_no_questions" => ("No questions available", "لا توجد أسئلة متاحة"),
    "history_empty" => ("No games played yet", "لا توجد جولات سابقة"),
};

/// 获取文案，未知键原样返回键名
pub fn text(key: &'static str, language: Language) -> &'static str {
    match MESSAGES.get(key) {
        Some(&(en, ar)) => match language {
            Language::English => en,
            Language::Arabic => ar,
        },
        None => key,
    }
}
