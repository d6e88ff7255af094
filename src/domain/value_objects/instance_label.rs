//! Instance label value object
//!
//! The version tag that distinguishes one publish run's folder from another's
//! (`python-advanced-2023`). Labels end up inside remote shell commands, so
//! only path-safe characters are accepted.

use std::fmt;
use std::str::FromStr;

use crate::error::{PublishError, PublishResult};

/// Label used when neither config nor CLI names one
pub const DEFAULT_INSTANCE: &str = "2023";

const MAX_LEN: usize = 64;

/// Validated instance label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceLabel(String);

impl InstanceLabel {
    /// Validate and wrap a label
    pub fn new(label: impl Into<String>) -> PublishResult<Self> {
        let label = label.into();
        validate_segment(&label).map_err(|reason| PublishError::InvalidInstance {
            label: label.clone(),
            reason,
        })?;
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstanceLabel {
    fn default() -> Self {
        Self(DEFAULT_INSTANCE.to_string())
    }
}

impl fmt::Display for InstanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InstanceLabel {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Check that `value` can be used as a single remote path segment.
///
/// Allowed: ASCII alphanumerics, `.`, `_`, `-`; must not start with `.` or `-`.
pub(crate) fn validate_segment(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > MAX_LEN {
        return Err(format!("must be at most {} characters", MAX_LEN));
    }
    if value.starts_with('.') || value.starts_with('-') {
        return Err("must not start with '.' or '-'".to_string());
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(format!("contains '{}'", bad));
    }
    Ok(())
}
