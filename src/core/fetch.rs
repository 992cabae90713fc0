use crate::domain::{FactRecord, FactSource, FetchOutcome, Language};
use std::collections::HashSet;

/// Outcomes of a bulk fetch, language-major and identifier-minor.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }

    pub fn records(&self) -> impl Iterator<Item = &FactRecord> {
        self.outcomes.iter().filter_map(FetchOutcome::record)
    }

    pub fn into_records(self) -> Vec<FactRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                FetchOutcome::Fetched(record) => Some(record),
                FetchOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_skipped())
    }

    pub fn fetched_count(&self) -> usize {
        self.records().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

/// Fetches ids `1..=count` for every language in order. A failed id is
/// recorded as skipped and the loop moves on to the next one. A language
/// listed more than once is fetched only the first time.
pub async fn fetch_all<F>(source: &F, languages: &[Language], count: u64) -> FetchReport
where
    F: FactSource + ?Sized,
{
    tracing::info!(
        "📥 Fetching {} facts in {} languages...",
        count,
        languages.len()
    );

    let mut report = FetchReport::default();
    let mut visited = HashSet::new();

    for &language in languages {
        if !visited.insert(language) {
            tracing::warn!("Language {} listed more than once, skipping repeat", language);
            continue;
        }

        tracing::info!("--- Fetching facts for language: {} ---", language);

        for id in 1..=count {
            let outcome = fetch_one(source, id, language).await;
            report.outcomes.push(outcome);

            if id % 25 == 0 {
                tracing::info!("Fetched {}/{} facts for '{}'...", id, count, language.name());
            }
        }
    }

    tracing::info!(
        "Fetched {} records, skipped {}",
        report.fetched_count(),
        report.skipped_count()
    );
    report
}

async fn fetch_one<F>(source: &F, id: u64, language: Language) -> FetchOutcome
where
    F: FactSource + ?Sized,
{
    match source.fetch_fact(id, language).await {
        Ok(fact) => FetchOutcome::Fetched(FactRecord::new(id, language, fact)),
        Err(e) => {
            tracing::warn!(
                "Could not fetch fact ID {} for language '{}', skipping: {}",
                id,
                language.name(),
                e
            );
            FetchOutcome::Skipped {
                fact_id: id,
                language,
                reason: e.to_string(),
            }
        }
    }
}
