use std::path::Path;

use har_core::FeatureNames;
use log::info;

use crate::error::{DatasetError, Result};
use crate::table::{open, read_index_name_pairs};

/// Loads `features.txt` and makes every column name unique.
pub fn load_feature_names(path: &Path) -> Result<FeatureNames> {
    let entries = read_index_name_pairs(open(path)?, path)?;
    if entries.is_empty() {
        return Err(DatasetError::Empty {
            path: path.to_path_buf(),
        });
    }
    let names = FeatureNames::from_entries(entries);
    info!(
        target: "har_data::features",
        "Loaded {} feature names from {}",
        names.len(),
        path.display()
    );
    Ok(names)
}
