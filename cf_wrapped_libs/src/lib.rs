pub mod badge;
pub mod cache;
pub mod codeforces;
pub mod loader;
pub mod rating;
pub mod stats;
pub mod summary;
pub mod time;
pub mod window;

pub use badge::{Badge, BadgeCounters};
pub use cache::{FileStore, MemoryStore, SystemClock, UserDataCache};
pub use loader::{LoaderError, UserDataLoader};
pub use stats::{AggregationSettings, YearStats};
pub use summary::{available_years, summarize_years, YearSummary};
pub use time::TimeNormalizer;
pub use window::{YearWindow, YearZone};
