// repomap utilities
//
// Small helpers shared by the scanner, scorer and formatter.

pub mod ignore;
pub mod path_relevance;
pub mod paths;
pub mod token_estimation;

pub use ignore::{is_ignored_by_pattern, load_ignore_file, DEFAULT_IGNORED_DIRS};
pub use path_relevance::PathRelevance;
pub use paths::to_relative_unix_style;
pub use token_estimation::TokenEstimator;
