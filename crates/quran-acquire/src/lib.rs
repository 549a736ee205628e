pub mod collect;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod progress;

pub use collect::{collect_passages, ChapterError, RunConfig};
pub use fetch::{ApiClient, ChapterSource, FetchConfig, FetchError};
pub use output::{persist, PersistOutcome};
pub use progress::{NullProgress, Progress};
