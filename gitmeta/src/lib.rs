#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod archive;
pub mod config;
pub mod digest;
pub mod github;
pub mod models;
pub mod runner;
pub mod snapshot;
pub mod summary;
pub mod target;
pub mod text;
pub mod threads;
pub mod token_cache;

pub use archive::{build_archive, build_file_map, ArchiveError, FileMap, SyncState};
pub use config::{ConfigError, FileConfig};
pub use digest::build_digest;
pub use github::{FetchError, GitHubClient, OctocrabTransport, RawResponse, Transport};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use snapshot::{fetch_snapshot, EntityCounts, Snapshot};
pub use summary::ExportSummary;
pub use target::{RepoTarget, ValidationError};
pub use threads::{build_issue_thread, build_pull_thread, group_by};
pub use token_cache::{TokenCache, TokenCacheError, TokenEntry};
