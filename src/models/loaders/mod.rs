pub mod corpus_loader;

pub use corpus_loader::{
    load_bundled_corpus, load_corpus_dir, Corpus, ModuleDocument, QuestionRecord,
    CURRENT_CORPUS_VERSION,
};
