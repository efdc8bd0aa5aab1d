pub mod engine;
pub mod spec;

use colored::Colorize;

use crate::config::settings::LlmConfig;
use crate::data::records::{PromiseRecord, RecordStore, FIELDS};
use crate::filter::spec::FilterSpec;
use crate::llm::translator::translate;

/// The full query pipeline: natural language in, matching records out.
///
/// An empty query bypasses the translator and returns the whole store. A
/// non-empty query that the translator could not turn into a spec, or a
/// spec the engine rejects, yields an empty result rather than the
/// unfiltered set.
pub async fn filter_records(
    store: &RecordStore,
    config: &LlmConfig,
    query: &str,
) -> Vec<PromiseRecord> {
    let query = query.trim();
    if query.is_empty() {
        return store.records().to_vec();
    }

    let spec = translate(config, query, FIELDS).await;
    resolve_spec(store, &spec)
}

/// Apply a translated spec, failing closed. An empty spec means the
/// translator could not understand the query; a spec the engine rejects is
/// treated the same way. Both yield no records, never the unfiltered set.
fn resolve_spec(store: &RecordStore, spec: &FilterSpec) -> Vec<PromiseRecord> {
    if spec.is_empty() {
        return Vec::new();
    }

    match engine::apply(store, spec) {
        Ok(records) => records,
        Err(e) => {
            eprintln!(
                "  {} {}",
                "✗".red(),
                format!("Could not apply filter: {}", e).red()
            );
            Vec::new()
        }
    }
}
