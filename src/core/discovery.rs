use crate::domain::{FactSource, Language};
use std::collections::HashSet;

/// Probe limit used when none is configured.
pub const DEFAULT_MAX_PROBES: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Fact at `id` repeated an earlier one.
    Duplicate { id: u64 },
    /// Request or response for `id` failed; treated as end of data.
    Failed { id: u64, reason: String },
    /// Every probe up to the limit returned a new fact.
    LimitReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub count: u64,
    pub stop: StopReason,
}

/// Counts the unique facts the provider serves by probing ids 1, 2, 3, ...
/// in the default language until a text repeats, a probe fails, or
/// `max_probes` ids have been checked.
pub async fn discover<F>(source: &F, max_probes: u64) -> DiscoveryReport
where
    F: FactSource + ?Sized,
{
    tracing::info!("🔎 Determining the total number of facts...");
    let mut known_facts = HashSet::new();

    for id in 1..=max_probes {
        match source.fetch_fact(id, Language::DEFAULT).await {
            Ok(fact) => {
                if !known_facts.insert(fact) {
                    tracing::info!(
                        "Found a duplicate fact at ID {}. Total unique facts: {}",
                        id,
                        id - 1
                    );
                    return DiscoveryReport {
                        count: id - 1,
                        stop: StopReason::Duplicate { id },
                    };
                }

                if id % 10 == 0 {
                    tracing::info!("Checked up to ID {}...", id);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Probe for ID {} failed, assuming end of data: {} ({:?})",
                    id,
                    e,
                    e.category()
                );
                return DiscoveryReport {
                    count: id - 1,
                    stop: StopReason::Failed {
                        id,
                        reason: e.to_string(),
                    },
                };
            }
        }
    }

    tracing::warn!(
        "⚠️ Reached the probe limit of {} without a repeated fact; the provider may hold more",
        max_probes
    );
    DiscoveryReport {
        count: max_probes,
        stop: StopReason::LimitReached,
    }
}

pub async fn discover_fact_count<F>(source: &F, max_probes: u64) -> u64
where
    F: FactSource + ?Sized,
{
    discover(source, max_probes).await.count
}
