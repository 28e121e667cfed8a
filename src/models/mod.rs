pub mod history;
pub mod language;
pub mod loaders;
pub mod question;
pub mod topic;

pub use history::{HistoryRecord, NewHistoryRecord};
pub use language::Language;
pub use loaders::{load_bundled_corpus, load_corpus_dir, Corpus};
pub use question::Question;
pub use topic::{Difficulty, Topic};
