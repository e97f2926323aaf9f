use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer identifier of an activity as it appears in the label files.
pub type ActivityId = u32;

/// Activities that count as locomotion for the binary label.
pub const WALKING_ACTIVITIES: [&str; 3] = ["WALKING", "WALKING_UPSTAIRS", "WALKING_DOWNSTAIRS"];

/// The six activity labels shipped with the UCI HAR dataset, keyed by id.
pub const CANONICAL_ACTIVITIES: [(ActivityId, &str); 6] = [
    (1, "WALKING"),
    (2, "WALKING_UPSTAIRS"),
    (3, "WALKING_DOWNSTAIRS"),
    (4, "SITTING"),
    (5, "STANDING"),
    (6, "LAYING"),
];

static CANONICAL_MAP: Lazy<ActivityMap> = Lazy::new(|| {
    ActivityMap::from_entries(
        CANONICAL_ACTIVITIES
            .iter()
            .map(|(id, name)| (*id, name.to_string())),
    )
    .expect("canonical activity ids are unique")
});

/// Errors raised while building an [`ActivityMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityMapError {
    /// The same id was declared for two activities.
    #[error("activity id {id} declared twice (`{existing}` and `{duplicate}`)")]
    DuplicateId {
        id: ActivityId,
        existing: String,
        duplicate: String,
    },
}

/// Derived two-class label: locomotion versus everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryLabel {
    Inactive = 0,
    Active = 1,
}

impl BinaryLabel {
    /// Returns the numeric encoding (`1` for active, `0` for inactive).
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_active(self) -> bool {
        self == BinaryLabel::Active
    }
}

impl From<BinaryLabel> for u8 {
    fn from(value: BinaryLabel) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for BinaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryLabel::Active => f.write_str("active"),
            BinaryLabel::Inactive => f.write_str("inactive"),
        }
    }
}

/// Maps an activity name to its binary label.
///
/// The mapping is total: the three walking variants are [`BinaryLabel::Active`],
/// any other string (including names outside the canonical six) is
/// [`BinaryLabel::Inactive`]. Matching is exact and case-sensitive.
pub fn to_binary_label(activity: &str) -> BinaryLabel {
    if WALKING_ACTIVITIES.contains(&activity) {
        BinaryLabel::Active
    } else {
        BinaryLabel::Inactive
    }
}

/// Ordered lookup from activity id to its human-readable label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityMap {
    labels: BTreeMap<ActivityId, String>,
}

impl ActivityMap {
    /// Builds a map from `(id, label)` pairs, rejecting duplicate ids.
    pub fn from_entries<I>(entries: I) -> Result<Self, ActivityMapError>
    where
        I: IntoIterator<Item = (ActivityId, String)>,
    {
        let mut labels: BTreeMap<ActivityId, String> = BTreeMap::new();
        for (id, label) in entries {
            match labels.entry(id) {
                btree_map::Entry::Occupied(existing) => {
                    return Err(ActivityMapError::DuplicateId {
                        id,
                        existing: existing.get().clone(),
                        duplicate: label,
                    });
                }
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(label);
                }
            }
        }
        Ok(Self { labels })
    }

    /// Returns the six labels of the published dataset.
    pub fn canonical() -> Self {
        CANONICAL_MAP.clone()
    }

    pub fn get(&self, id: ActivityId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.labels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(id, label)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, &str)> + '_ {
        self.labels.iter().map(|(id, label)| (*id, label.as_str()))
    }

    /// Looks up `id` and derives its binary label in one step.
    pub fn binary_label(&self, id: ActivityId) -> Option<BinaryLabel> {
        self.get(id).map(to_binary_label)
    }
}

/// Column names for the feature matrix, made unique by row suffix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureNames {
    names: Vec<String>,
}

impl FeatureNames {
    /// Builds the column names from the `(index, name)` rows of the feature file.
    ///
    /// Every name receives a `_<row>` suffix, where `<row>` is the zero-based
    /// position of the entry (the file's own index column is not used). Since
    /// the suffix follows the final underscore and row positions are distinct,
    /// the resulting names are pairwise distinct for any input.
    pub fn from_entries(entries: Vec<(u32, String)>) -> Self {
        let names: Vec<String> = entries
            .into_iter()
            .enumerate()
            .map(|(row, (_, name))| format!("{name}_{row}"))
            .collect();
        log::trace!(
            target: "har_core::features",
            "Suffixed {} feature names with their row position",
            names.len()
        );
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.names.get(column).map(String::as_str)
    }

    /// Returns the column position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}
