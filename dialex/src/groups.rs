//! Group registry for tracking capture groups
//!
//! The tree builder registers every capturing group as its opener is seen,
//! so numbers follow opener order exactly as a regex engine assigns them.
//! Once the whole tree is built, backreferences are checked against the
//! registry. Problems found here are semantic, so they surface as warnings.

use std::collections::HashMap;

use thiserror::Error;

/// Information about a capture group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// The index of the group (1-based, as `\1`, `\2` refer to them)
    pub index: u32,
    /// The name of the group (if it's a named group)
    pub name: Option<String>,
    /// Character offset of the group opener
    pub offset: usize,
}

impl GroupInfo {
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// Registry for tracking capture groups
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<GroupInfo>,
    name_to_index: HashMap<String, u32>,
}

impl GroupRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        GroupRegistry::default()
    }

    /// Register a new capture group and return its index
    ///
    /// A duplicate name still consumes an index; the name keeps resolving to
    /// the first group that used it.
    ///
    /// # Errors
    /// Returns [`GroupRegistryError::DuplicateGroupName`] alongside the index
    /// when the name is already in use.
    pub fn register_group(
        &mut self,
        name: Option<&str>,
        offset: usize,
    ) -> (u32, Option<GroupRegistryError>) {
        let index = u32::try_from(self.groups.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        let mut error = None;

        if let Some(group_name) = name {
            if self.name_to_index.contains_key(group_name) {
                error = Some(GroupRegistryError::DuplicateGroupName(
                    group_name.to_string(),
                ));
            } else {
                self.name_to_index.insert(group_name.to_string(), index);
            }
        }

        self.groups.push(GroupInfo {
            index,
            name: name.map(str::to_string),
            offset,
        });
        (index, error)
    }

    /// Get group index by name
    pub fn get_by_name(&self, name: &str) -> Option<u32> {
        self.name_to_index.get(name).copied()
    }

    /// Get the total number of capture groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Get all group infos
    pub fn groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    /// Validate that a backreference name exists
    pub fn validate_backref_name(&self, name: &str) -> Result<u32, GroupRegistryError> {
        self.get_by_name(name)
            .ok_or_else(|| GroupRegistryError::UndefinedBackreference(name.to_string()))
    }

    /// Validate that a backreference number exists
    pub fn validate_backref_number(&self, num: u32) -> Result<u32, GroupRegistryError> {
        if num == 0 || num as usize > self.groups.len() {
            Err(GroupRegistryError::InvalidBackreference(num))
        } else {
            Ok(num)
        }
    }
}

/// Errors that can occur in the group registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupRegistryError {
    /// A group name is used more than once
    #[error("duplicate group name '{0}'")]
    DuplicateGroupName(String),
    /// A named backreference refers to a non-existent group
    #[error("backreference to undefined group '{0}'")]
    UndefinedBackreference(String),
    /// A numbered backreference refers to a non-existent group
    #[error("backreference \\{0} refers to a group that does not exist")]
    InvalidBackreference(u32),
}
