mod matcher;

pub use matcher::{MatchOptions, Pattern};

use log::{debug, warn};

use crate::config::SearchConfig;
use crate::model::Recipe;

/// One search result: the position of the record in the indexed list
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug, Clone)]
struct IndexedValue {
    text: String,
    norm: f64,
}

#[derive(Debug, Clone)]
struct IndexedRecord {
    /// Values per key, in key order
    fields: Vec<Vec<IndexedValue>>,
}

/// Search index over a fixed list of recipes
#[derive(Debug, Clone)]
pub struct SearchIndex {
    records: Vec<IndexedRecord>,
    key_weight: f64,
    options: MatchOptions,
}

impl SearchIndex {
    pub fn new(recipes: &[Recipe], config: &SearchConfig) -> Self {
        let probe = Recipe::default();
        let mut keys = Vec::with_capacity(config.keys.len());
        for key in &config.keys {
            if probe.field_values(key).is_some() {
                keys.push(key.as_str());
            } else {
                warn!("Ignoring unknown search key '{}'", key);
            }
        }

        let records = recipes
            .iter()
            .map(|recipe| IndexedRecord {
                fields: keys
                    .iter()
                    .map(|key| {
                        recipe
                            .field_values(key)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|text| IndexedValue {
                                text: text.to_string(),
                                norm: field_norm(text),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        debug!(
            "Built search index over {} recipes and {} keys",
            recipes.len(),
            keys.len()
        );

        Self {
            records,
            key_weight: if keys.is_empty() {
                1.0
            } else {
                1.0 / keys.len() as f64
            },
            options: MatchOptions {
                threshold: config.threshold,
                distance: config.distance,
                location: config.location,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `query`, best first
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let pattern = Pattern::new(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.score_record(record, &pattern)
                    .map(|score| SearchHit { index, score })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.index.cmp(&b.index))
        });

        debug!("Query '{}' matched {} recipes", query, hits.len());
        hits
    }

    fn score_record(&self, record: &IndexedRecord, pattern: &Pattern) -> Option<f64> {
        let mut matched = false;
        let mut total = 1.0;

        for value in record.fields.iter().flatten() {
            if let Some(score) = pattern.score(&value.text, &self.options) {
                matched = true;
                let base = if score == 0.0 { f64::EPSILON } else { score };
                total *= base.powf(self.key_weight * value.norm);
            }
        }

        matched.then_some(total)
    }
}

/// Longer fields weigh less: 1 / sqrt(word count), rounded to 3 places
fn field_norm(text: &str) -> f64 {
    let words = text.split(' ').filter(|w| !w.is_empty()).count().max(1);
    ((1.0 / (words as f64).sqrt()) * 1000.0).round() / 1000.0
}
