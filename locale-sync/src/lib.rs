//! Keeps translated message files in step with a source locale.
//!
//! A run walks the messages tree for `<source>.<ext>` files, merges each one
//! into every target locale (reusing cached and existing translations,
//! asking a [`MachineTranslator`](locale_sync_mt::MachineTranslator) for the
//! rest), regenerates the target files and finally persists the
//! translation cache.
//!
//! # Example
//!
//! ```ignore
//! use locale_sync::{SyncConfig, run_sync};
//! use locale_sync_mt::create_provider;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::default().with_locales(["fr", "pt-br"]);
//!     let provider = create_provider(&config.provider);
//!     let report = run_sync(&config, provider.as_ref()).await?;
//!     for locale in &report.locales {
//!         println!("{}: {}", locale.locale, locale.stats);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod fsio;
pub mod merge;
pub mod module;
pub mod stats;
pub mod symbol;
pub mod sync;
pub mod synthesize;
pub mod walker;

pub use cache::{TranslationCache, cache_key};
pub use config::SyncConfig;
pub use content::ContentNode;
pub use error::{SyncError, SyncResult};
pub use merge::{DEFAULT_PRESERVED_KEYS, MergeEngine, MergeOptions};
pub use module::{FileFormat, MessageFile, load_message_file, parse_message_file};
pub use stats::LocaleStats;
pub use symbol::derive_symbol_name;
pub use sync::{FileAction, FileReport, LocaleReport, SyncReport, run_sync};
pub use synthesize::synthesize;
pub use walker::{RESERVED_TYPES_DIR, discover_source_files, target_path_for};
