use crate::core::discovery::{self, DiscoveryReport, DEFAULT_MAX_PROBES};
use crate::core::fetch;
use crate::core::persist::{self, DEFAULT_OUTPUT_FILE};
use crate::domain::{ConfigProvider, FactSource, Language, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// How a run ended. Partial fetch failures still end in `Saved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Discovery found no facts; nothing was fetched or written.
    Aborted { discovery: DiscoveryReport },
    /// Every fetch attempt was skipped; no file was written.
    NothingFetched { count: u64, skipped: usize },
    Saved {
        path: String,
        records: usize,
        skipped: usize,
    },
}

/// Runs discovery, bulk fetch and persistence once each, in that order.
pub struct EtlEngine<F: FactSource, S: Storage> {
    source: F,
    storage: S,
    languages: Vec<Language>,
    output_file: String,
    max_probes: u64,
    monitor: SystemMonitor,
}

impl<F: FactSource, S: Storage> EtlEngine<F, S> {
    pub fn new(source: F, storage: S) -> Self {
        Self {
            source,
            storage,
            languages: Language::ALL.to_vec(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            max_probes: DEFAULT_MAX_PROBES,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn from_config<C: ConfigProvider>(source: F, storage: S, config: &C) -> Self {
        Self::new(source, storage)
            .with_languages(config.languages().to_vec())
            .with_output_file(config.output_file())
            .with_max_probes(config.max_probes())
            .with_monitoring(config.monitoring_enabled())
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn with_max_probes(mut self, max_probes: u64) -> Self {
        self.max_probes = max_probes;
        self
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn run(&mut self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting fact extraction process");

        let discovery = discovery::discover(&self.source, self.max_probes).await;
        self.monitor.log_stats("Discovery");

        if discovery.count == 0 {
            tracing::warn!("Could not determine the number of facts. Exiting.");
            self.monitor.log_final_stats();
            return Ok(RunOutcome::Aborted { discovery });
        }

        let report = fetch::fetch_all(&self.source, &self.languages, discovery.count).await;
        self.monitor.log_stats("Bulk Fetch");

        let skipped = report.skipped_count();
        let records = report.into_records();

        if records.is_empty() {
            tracing::warn!("No data was fetched. The output file will not be created.");
            self.monitor.log_final_stats();
            return Ok(RunOutcome::NothingFetched {
                count: discovery.count,
                skipped,
            });
        }

        let path = persist::save(&self.storage, &self.output_file, &records).await?;
        self.monitor.log_final_stats();

        tracing::info!("Extraction process finished.");
        Ok(RunOutcome::Saved {
            path,
            records: records.len(),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::discovery::StopReason;
    use crate::core::test_support::{MemoryStorage, ScriptedSource};
    use crate::domain::FactRecord;

    #[tokio::test]
    async fn test_full_run_saves_records() {
        let source = ScriptedSource::new()
            .with_fact(1, Language::Eng, "one")
            .with_fact(2, Language::Eng, "two")
            .with_fact(3, Language::Eng, "one")
            .with_fact(1, Language::Cze, "jedna")
            .with_failure(2, Language::Cze);

        let mut engine = EtlEngine::new(source, MemoryStorage::new())
            .with_languages(vec![Language::Eng, Language::Cze])
            .with_output_file("facts.json");

        let outcome = engine.run().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Saved {
                path: "memory://facts.json".to_string(),
                records: 3,
                skipped: 1,
            }
        );

        let data = engine.storage().get_file("facts.json").unwrap();
        let saved: Vec<FactRecord> = serde_json::from_slice(&data).unwrap();
        let texts: Vec<&str> = saved.iter().map(|r| r.fact.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "jedna"]);
    }

    #[tokio::test]
    async fn test_zero_count_aborts_without_writing() {
        let source = ScriptedSource::new().with_failure(1, Language::Eng);
        let storage = MemoryStorage::new();

        let mut engine = EtlEngine::new(source, storage.clone());
        let outcome = engine.run().await.unwrap();

        match outcome {
            RunOutcome::Aborted { discovery } => {
                assert_eq!(discovery.count, 0);
                assert!(matches!(discovery.stop, StopReason::Failed { id: 1, .. }));
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
        assert_eq!(storage.file_count(), 0);
    }

    #[tokio::test]
    async fn test_nothing_fetched_writes_no_file() {
        // Discovery succeeds, then every bulk request fails.
        let source = ScriptedSource::new()
            .with_fact(1, Language::Eng, "one")
            .with_fact(2, Language::Eng, "one");
        let storage = MemoryStorage::new();

        let mut engine =
            EtlEngine::new(source, storage.clone()).with_languages(vec![Language::Ger]);
        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome, RunOutcome::NothingFetched { count: 1, skipped: 1 });
        assert_eq!(storage.file_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_language_in_config_writes_each_pair_once() {
        let source = ScriptedSource::new()
            .with_fact(1, Language::Eng, "one")
            .with_fact(2, Language::Eng, "one");

        let mut engine = EtlEngine::new(source, MemoryStorage::new())
            .with_languages(vec![Language::Eng, Language::Eng]);

        let outcome = engine.run().await.unwrap();

        assert!(matches!(outcome, RunOutcome::Saved { records: 1, .. }));
        let data = engine.storage().get_file(DEFAULT_OUTPUT_FILE).unwrap();
        let saved: Vec<FactRecord> = serde_json::from_slice(&data).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!((saved[0].fact_id, saved[0].language.as_str()), (1, "English"));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let source = ScriptedSource::new()
            .with_fact(1, Language::Eng, "one")
            .with_fact(2, Language::Eng, "one");

        let mut engine = EtlEngine::new(source, MemoryStorage::read_only())
            .with_languages(vec![Language::Eng]);

        assert!(engine.run().await.is_err());
    }
}
