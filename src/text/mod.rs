//! Text analysis pipeline for project titles.
//!
//! Three stages, each a pure function of its input:
//! - **normalize**: lowercase, strip punctuation, drop stopwords
//! - **frequency**: whitespace tokenization and corpus-wide counting
//! - **cloud**: deterministic frequency-weighted word-cloud layout

pub mod cloud;
pub mod frequency;
pub mod normalize;

pub use cloud::WordCloudLayout;
pub use frequency::{word_frequency, FrequencyTable};
pub use normalize::preprocess;
