use std::path::Path;

use har_core::ActivityMap;
use log::{debug, info};

use crate::error::{DatasetError, Result};
use crate::table::{open, read_index_name_pairs};

/// Loads `activity_labels.txt` into an id to label lookup.
pub fn load_activity_map(path: &Path) -> Result<ActivityMap> {
    let entries = read_index_name_pairs(open(path)?, path)?;
    if entries.is_empty() {
        return Err(DatasetError::Empty {
            path: path.to_path_buf(),
        });
    }
    let map = ActivityMap::from_entries(entries).map_err(|source| DatasetError::ActivityMap {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        target: "har_data::activities",
        "Loaded {} activity labels from {}",
        map.len(),
        path.display()
    );
    for (id, label) in map.iter() {
        debug!(target: "har_data::activities", "  {} => {}", id, label);
    }
    Ok(map)
}
