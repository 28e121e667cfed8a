//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 打开数据库、同步题库缓存、读取语言设置
//! - 按命令调度：答题、历史、清空、语言、模块列表
//!
//! ### `quiz_runner` - 终端答题流程
//! - 驱动单个 `QuizSession`：逐题显示、读取作答、前进
//! - 完成后写入答题记录
//!
//! ### `command` - 命令行解析
//!
//! ## 层次关系
//!
//! ```text
//! app (处理命令)
//!     ↓
//! quiz_runner (处理一轮答题)
//!     ↓
//! workflow::QuizSession (状态机)
//!     ↓
//! services (选题 / 设置)
//!     ↓
//! storage (题库缓存 / 答题记录)
//! ```

pub mod app;
pub mod command;
pub mod quiz_runner;

pub use app::App;
pub use command::Command;
pub use quiz_runner::{PlayResult, QuizRunner};
