#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod backend;
pub mod batch;
pub mod config;
pub mod errors;
pub mod generator;
pub mod harness;
pub mod profile;
pub mod progress;
pub mod record;
pub mod schema;
pub mod statement;
pub mod store;
pub mod verify;
pub mod workload;

// Re-export main types
pub use backend::{Applied, Backend, BackendKind, Builder, DirectSql, Reader, UpsertExecutor};
pub use batch::{BatchStats, TxScope};
pub use config::{BackendChoice, Config};
pub use generator::RecordGenerator;
pub use harness::RunReport;
pub use progress::{LogProgress, Phase, Progress, Silent};
pub use record::UserRecord;
pub use store::Store;
pub use verify::{MissingKeyPolicy, VerifyStats};

// Re-export errors
pub use errors::{Error, Result};
