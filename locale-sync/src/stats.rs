//! Per-locale run statistics

use std::fmt;

/// Counters accumulated while merging one target locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleStats {
    /// String leaves visited, whatever happened to them
    pub processed: usize,
    /// Leaves answered from the translation cache
    pub from_cache: usize,
    /// Leaves whose existing target value was kept (and cached)
    pub reused_existing: usize,
    /// Leaves sent to the provider or given a dry-run placeholder
    pub translated: usize,
    /// Leaves that fell back to source text after a provider error
    pub failed: usize,
    /// Provider-failure warnings emitted; never more than one per locale
    pub provider_warnings: usize,
}

impl fmt::Display for LocaleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} cached={} existing={} translated={} failed={}",
            self.processed, self.from_cache, self.reused_existing, self.translated, self.failed
        )
    }
}
