//! Machine translation providers for locale-sync
//!
//! The sync engine talks to translation backends only through the
//! [`MachineTranslator`] trait. This crate ships the passthrough provider,
//! Google Translate and LibreTranslate clients, a recording mock for tests,
//! and [`create_provider`] to pick one by name.
//!
//! # Example
//!
//! ```ignore
//! use locale_sync_mt::{MachineTranslator, create_provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider("google");
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = provider.translate_batch(&texts, "en", "fr").await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

pub mod entities;
pub mod error;
pub mod google_translate;
pub mod libre_translate;
pub mod mock;
pub mod passthrough;
pub mod registry;
pub mod translator;

// Re-export main types for convenient access
pub use entities::decode_html_entities;
pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use libre_translate::LibreTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use passthrough::PassthroughTranslator;
pub use registry::{PROVIDER_NAMES, create_provider, create_provider_with};
pub use translator::{MachineTranslator, canonical_locale, validate_locale};
