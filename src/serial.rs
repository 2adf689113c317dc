//! External representation of status entities
//!
//! Every status entity maps to a keyed JSON document whose field order
//! follows the struct's declaration order; nested logs and job lists are
//! projected recursively. Reconstruction requires every projected field
//! to be present and every state value to name a known variant — a
//! missing key or unrecognized state is a fatal parse error, not a
//! default-filled gap.

use crate::core::{JobStatus, PipelineStatus, StatusMessage};
use crate::error::StatusError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Conversion between a status entity and its persisted JSON form
///
/// Reconstructing from a projection and re-projecting reproduces the
/// original document field-for-field, for every reachable instance state.
pub trait Serial: Serialize + DeserializeOwned {
    /// Project to a JSON value
    fn to_value(&self) -> Result<Value, StatusError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Project to a pretty-printed JSON document
    fn to_json(&self) -> Result<String, StatusError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reconstruct from a JSON value
    fn from_value(value: Value) -> Result<Self, StatusError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reconstruct from a JSON document
    fn from_json(json: &str) -> Result<Self, StatusError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reconstruct from a JSON file on disk
    fn read_json(path: impl AsRef<Path>) -> Result<Self, StatusError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the projected document to a file on disk
    fn write_json(&self, path: impl AsRef<Path>) -> Result<(), StatusError> {
        Ok(fs::write(path, self.to_json()?)?)
    }
}

impl Serial for StatusMessage {}
impl Serial for JobStatus {}
impl Serial for PipelineStatus {}
