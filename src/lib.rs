//! # Bilingual Trivia
//!
//! 阿拉伯语 / 英语双语知识问答的核心逻辑
//!
//! ## 架构设计
//!
//! ### ① 存储层（Storage）
//! - `storage/` - 题库本地缓存（SQLite，带版本标记）与答题记录
//! - `QuestionStore` / `HistoryLog` - 通过构造函数注入的协作接口
//!
//! ### ② 业务能力层（Services）
//! - `QuestionSelector` - 按模块+难度选题并随机排序
//! - `SettingsService` - 显示语言设置，单一读写路径
//!
//! ### ③ 流程层（Workflow）
//! - `QuizSession` - 答题状态机（Loading → Active → Complete / Error）
//! - `ShuffledPresentation` - 单题选项打乱与正确答案重新定位
//! - `scoring` - 百分比与评语等级
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 持有存储与设置，按命令调度
//! - `QuizRunner` - 在终端驱动一轮答题
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, HistoryRecord, Language, NewHistoryRecord, Question, Topic};
pub use orchestrator::{App, Command, PlayResult};
pub use services::{QuestionSelector, SettingsService};
pub use storage::{HistoryLog, QuestionStore};
pub use workflow::{QuizSession, SessionError, SessionPhase};
