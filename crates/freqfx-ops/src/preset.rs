//! Named filter presets loaded from YAML.
//!
//! A filter bank is a named list of descriptors, so that a set of filters
//! tuned for one kind of source (e.g. a scanner with known moire) can be
//! kept next to the images instead of in code.
//!
//! # Format
//!
//! ```yaml
//! name: scanner-cleanup
//! filters:
//!   - name: smooth
//!     kind: lowpass
//!     shape: { type: gaussian }
//!     radius: 20
//!   - name: moire
//!     kind: notchreject
//!     shape: { type: butterworth, order: 2 }
//!     center: { u: 10, v: 10 }
//!     radius: 3
//!   - name: rings
//!     kind: bandreject
//!     shape: { type: ideal }
//!     radius: 30
//!     bandwidth: 4
//! ```
//!
//! `center` defaults to the zero-frequency origin. `bandwidth` is required
//! for band kinds and rejected for all others when the filter is built.

use crate::compose::{compose_filter, FilterDescriptor};
use crate::{FilterError, FilterResult};
use freqfx_core::TransferFunction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// A descriptor with a lookup name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFilter {
    /// Lookup name, unique within a bank
    pub name: String,
    /// Filter parameters
    #[serde(flatten)]
    pub descriptor: FilterDescriptor,
}

/// A named collection of filter presets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterBank {
    /// Bank name
    #[serde(default)]
    pub name: String,
    /// Presets in declaration order
    #[serde(default)]
    pub filters: Vec<NamedFilter>,
}

impl FilterBank {
    /// Creates an empty bank.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: Vec::new(),
        }
    }

    /// Adds a preset, builder style.
    pub fn with(mut self, name: impl Into<String>, descriptor: FilterDescriptor) -> Self {
        self.filters.push(NamedFilter {
            name: name.into(),
            descriptor,
        });
        self
    }

    /// Loads a bank from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let bank = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), filters = bank.filters.len(), "Loaded filter bank");
        Ok(bank)
    }

    /// Parses a bank from a YAML string.
    ///
    /// # Errors
    ///
    /// [`FilterError::Yaml`] on malformed input, including unknown kinds or
    /// shapes, and [`FilterError::InvalidParameter`] on duplicate names.
    pub fn from_yaml_str(yaml: &str) -> FilterResult<Self> {
        let bank: Self = serde_yaml::from_str(yaml)?;
        let mut seen = HashSet::new();
        for f in &bank.filters {
            if !seen.insert(f.name.as_str()) {
                return Err(FilterError::InvalidParameter(format!(
                    "duplicate preset name '{}' in bank '{}'",
                    f.name, bank.name
                )));
            }
        }
        Ok(bank)
    }

    /// Serializes the bank back to YAML.
    pub fn to_yaml_string(&self) -> FilterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Looks a preset up by name.
    pub fn get(&self, name: &str) -> FilterResult<&FilterDescriptor> {
        self.filters
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.descriptor)
            .ok_or_else(|| FilterError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Preset names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.name.as_str())
    }

    /// Builds the named preset for a `rows × cols` spectrum.
    pub fn build(&self, name: &str, rows: usize, cols: usize) -> FilterResult<TransferFunction> {
        compose_filter(self.get(name)?, rows, cols)
    }

    /// Builds every preset for a `rows × cols` spectrum.
    ///
    /// Stops at the first preset that fails to build.
    pub fn build_all(
        &self,
        rows: usize,
        cols: usize,
    ) -> FilterResult<Vec<(String, TransferFunction)>> {
        self.filters
            .iter()
            .map(|f| Ok((f.name.clone(), compose_filter(&f.descriptor, rows, cols)?)))
            .collect()
    }
}
