//! User/group id mappings applied while content is staged onto disk.

use crate::errors::{ContentError, ContentResult};
use serde::{Deserialize, Serialize};

/// One contiguous id range rewrite.
///
/// Ids `container_id .. container_id + size` found in extracted content are
/// owned by `host_id .. host_id + size` once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdMapping {
    pub container_id: u32,
    pub host_id: u32,
    pub size: u32,
}

impl IdMapping {
    pub fn new(container_id: u32, host_id: u32, size: u32) -> Self {
        Self {
            container_id,
            host_id,
            size,
        }
    }

    /// Translate a single id through this range.
    pub fn map_to_host(&self, id: u32) -> Option<u32> {
        let offset = id.checked_sub(self.container_id)?;
        if offset < self.size {
            self.host_id.checked_add(offset)
        } else {
            None
        }
    }

    fn container_end(&self) -> u64 {
        self.container_id as u64 + self.size as u64
    }
}

/// Translate `id` through the first mapping whose range contains it.
pub fn map_id(mappings: &[IdMapping], id: u32) -> Option<u32> {
    mappings.iter().find_map(|m| m.map_to_host(id))
}

/// Reject zero-sized ranges and overlapping container ranges.
pub fn validate_mappings(mappings: &[IdMapping]) -> ContentResult<()> {
    for (i, mapping) in mappings.iter().enumerate() {
        if mapping.size == 0 {
            return Err(ContentError::InvalidArgument(format!(
                "id mapping {} has zero size",
                i
            )));
        }
        if mapping.host_id as u64 + mapping.size as u64 > u32::MAX as u64 + 1 {
            return Err(ContentError::InvalidArgument(format!(
                "id mapping {} overflows the host id space",
                i
            )));
        }

        for (j, other) in mappings.iter().enumerate().skip(i + 1) {
            let overlaps = (mapping.container_id as u64) < other.container_end()
                && (other.container_id as u64) < mapping.container_end();
            if overlaps {
                return Err(ContentError::InvalidArgument(format!(
                    "id mappings {} and {} overlap",
                    i, j
                )));
            }
        }
    }
    Ok(())
}
