use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;

/// Tracks which labels are currently shown by a balloon and hands out the
/// next unused one. Selection draws from the caller's RNG so seeded runs
/// are reproducible.
pub struct NameRotationPool {
    labels: Vec<String>,
    displayed: HashSet<String>,
}

impl NameRotationPool {
    pub fn new(labels: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(labels.len());
        let mut deduped = Vec::with_capacity(labels.len());
        for label in labels {
            if seen.insert(label.clone()) {
                deduped.push(label);
            }
        }

        Self {
            labels: deduped,
            displayed: HashSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[cfg(test)]
    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    #[cfg(test)]
    pub fn is_displayed(&self, label: &str) -> bool {
        self.displayed.contains(label)
    }

    /// Uniform random label from (pool − displayed). When the displayed set
    /// already covers the whole pool (more balloon slots than labels), a
    /// random displayed label is freed and returned instead of failing.
    /// The caller claims the returned label once it actually shows it.
    pub fn pick_unused(&mut self, rng: &mut StdRng) -> Option<String> {
        if self.labels.is_empty() {
            return None;
        }

        let available: Vec<&String> = self
            .labels
            .iter()
            .filter(|label| !self.displayed.contains(*label))
            .collect();

        if available.is_empty() {
            // Pool order keeps the draw reproducible under a seeded RNG.
            let displayed_in_order: Vec<&String> = self
                .labels
                .iter()
                .filter(|label| self.displayed.contains(*label))
                .collect();
            let recycled =
                displayed_in_order[rng.gen_range(0..displayed_in_order.len())].clone();
            self.displayed.remove(&recycled);
            return Some(recycled);
        }

        Some(available[rng.gen_range(0..available.len())].clone())
    }

    pub fn claim(&mut self, label: &str) {
        self.displayed.insert(label.to_owned());
    }

    pub fn release(&mut self, label: &str) {
        self.displayed.remove(label);
    }

    pub fn clear_displayed(&mut self) {
        self.displayed.clear();
    }
}
