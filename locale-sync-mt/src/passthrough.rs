//! Passthrough provider: returns every input unchanged
//!
//! Used when no credentials are configured, when an unknown provider is
//! requested, and as the explicit `passthrough` choice. Never fails.

use crate::error::MtResult;
use crate::translator::MachineTranslator;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl PassthroughTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MachineTranslator for PassthroughTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source_locale: &str,
        _target_locale: &str,
    ) -> MtResult<Vec<String>> {
        Ok(texts.to_vec())
    }

    fn provider_name(&self) -> &str {
        "passthrough"
    }
}
