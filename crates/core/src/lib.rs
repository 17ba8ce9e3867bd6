pub mod config;
pub mod fingerprint;
pub mod metrics;
pub mod notifier;
pub mod provider;
pub mod store;
pub mod testing;
pub mod watcher;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    NotifierConfig, ProviderConfig, SanitizedConfig, ServerConfig, WatcherConfig,
};
pub use fingerprint::fingerprint;
pub use notifier::{DiscordNotifier, Notifier, NotifyError};
pub use provider::{CandidateResult, ProviderError, SearchProvider, SerpApiProvider};
pub use store::{
    ClaimOutcome, Keyword, SeenResult, SqliteWatchStore, StoreError, StoreStats, WatchStore,
};
pub use watcher::{
    CycleError, CycleReport, CycleRunner, CycleScheduler, FailureKind, KeywordFailure, LastRun,
    SchedulerStatus,
};
