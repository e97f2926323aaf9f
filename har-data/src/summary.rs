use std::collections::BTreeMap;

use har_core::{to_binary_label, ActivityId, ActivityMap, BinaryLabel};
use serde::Serialize;

use crate::dataset::{HarDataset, LabeledSplit, Split};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityCount {
    pub id: ActivityId,
    pub activity: String,
    pub binary: BinaryLabel,
    pub count: usize,
}

/// Class distribution of one split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    pub samples: usize,
    pub feature_rows: usize,
    pub features: usize,
    pub activities: Vec<ActivityCount>,
    pub unmapped: usize,
    pub active: usize,
    pub inactive: usize,
}

impl SplitSummary {
    /// Counts labels per activity, listed in activity-map order.
    pub fn from_split(split: &LabeledSplit, activity_map: &ActivityMap) -> Self {
        let mut per_id: BTreeMap<ActivityId, usize> = BTreeMap::new();
        let mut unmapped = 0usize;
        let mut active = 0usize;
        for record in &split.labels {
            if record.activity.is_some() {
                *per_id.entry(record.id).or_default() += 1;
            } else {
                unmapped += 1;
            }
            if record.binary.is_active() {
                active += 1;
            }
        }

        let activities = activity_map
            .iter()
            .map(|(id, activity)| ActivityCount {
                id,
                activity: activity.to_string(),
                binary: to_binary_label(activity),
                count: per_id.get(&id).copied().unwrap_or(0),
            })
            .collect();

        Self {
            split: split.split,
            samples: split.len(),
            feature_rows: split.features.rows(),
            features: split.features.columns(),
            activities,
            unmapped,
            active,
            inactive: split.len() - active,
        }
    }

    /// Share of samples labelled active, or zero for an empty split.
    pub fn active_fraction(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.active as f64 / self.samples as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub feature_count: usize,
    pub activity_count: usize,
    pub train: SplitSummary,
    pub test: SplitSummary,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &HarDataset) -> Self {
        Self {
            feature_count: dataset.feature_names.len(),
            activity_count: dataset.activity_map.len(),
            train: SplitSummary::from_split(&dataset.train, &dataset.activity_map),
            test: SplitSummary::from_split(&dataset.test, &dataset.activity_map),
        }
    }

    pub fn splits(&self) -> [&SplitSummary; 2] {
        [&self.train, &self.test]
    }
}
