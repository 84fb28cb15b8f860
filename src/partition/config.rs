//! Grouping parameters.

use crate::error::{Error, Result};

/// Number of groups and per-group capacity for one problem instance.
///
/// # Examples
///
/// ```
/// use u_affinity::partition::GroupingParams;
///
/// let params = GroupingParams::new(4, 10);
/// assert!(params.check_fits(40).is_ok());
/// assert!(params.check_fits(41).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupingParams {
    /// Fixed number of groups for the whole search.
    pub num_groups: usize,

    /// Maximum members per group.
    pub capacity: usize,
}

impl GroupingParams {
    pub fn new(num_groups: usize, capacity: usize) -> Self {
        Self {
            num_groups,
            capacity,
        }
    }

    /// Validates the parameters on their own.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.num_groups == 0 {
            return Err("num_groups must be positive".into());
        }
        if self.capacity == 0 {
            return Err("capacity must be positive".into());
        }
        Ok(())
    }

    /// Checks that `nodes` can be seeded into and held by the groups.
    pub fn check_fits(&self, nodes: usize) -> Result<()> {
        self.validate().map_err(Error::InvalidConfig)?;
        if self.num_groups > nodes {
            return Err(Error::TooManyGroups {
                groups: self.num_groups,
                nodes,
            });
        }
        if self.num_groups.saturating_mul(self.capacity) < nodes {
            return Err(Error::InsufficientCapacity {
                groups: self.num_groups,
                capacity: self.capacity,
                nodes,
            });
        }
        Ok(())
    }
}
