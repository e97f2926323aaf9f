pub mod activities;
pub mod dataset;
pub mod error;
pub mod features;
pub mod summary;
pub mod table;

#[cfg(test)]
mod test_support;

pub use activities::load_activity_map;
pub use dataset::{
    load_dataset, load_split, ActivityRecord, DatasetConfig, DatasetPaths, FeatureMatrix,
    HarDataset, LabeledSplit, Split, ValidationMode,
};
pub use error::{DatasetError, Result};
pub use features::load_feature_names;
pub use summary::{ActivityCount, DatasetSummary, SplitSummary};
