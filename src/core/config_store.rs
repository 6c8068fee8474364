//! Configuration store
//!
//! Holds the sections of the most recent successful configuration load.
//! A load parses the whole source first and only then publishes the new
//! sections, so lookups see either the previous configuration or the new one.
//! A failed load leaves the previous configuration in place.

use crate::core::snapshot::Snapshot;
use crate::io::config_format::{parse_config, parse_config_str, ParsedConfig};
use crate::types::{ConfigSection, EngineError, Sections};
use std::io::BufRead;
use tracing::info;

/// Configuration bundled with the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../data/config.txt");

/// Section store for the sectioned key/value configuration
#[derive(Debug, Default)]
pub struct ConfigStore {
    sections: Snapshot<Sections>,
}

impl ConfigStore {
    /// Create an empty store; nothing is loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration source and replace all sections
    ///
    /// # Returns
    ///
    /// * `Ok(Sections)` - A copy of the newly published sections
    /// * `Err(EngineError)` - The source could not be read; nothing changed
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Sections, EngineError> {
        let parsed = parse_config(reader)?;
        Ok(self.publish(parsed))
    }

    /// Parse configuration text held in memory and replace all sections
    pub fn parse_str(&self, text: &str) -> Sections {
        self.publish(parse_config_str(text))
    }

    /// Replace all sections with the bundled default configuration
    pub fn load_default(&self) -> Sections {
        self.parse_str(DEFAULT_CONFIG)
    }

    /// Publish an already parsed configuration
    pub fn publish(&self, parsed: ParsedConfig) -> Sections {
        info!(
            sections = parsed.sections.len(),
            skipped = parsed.skipped.len(),
            "Configuration loaded"
        );
        let published = self.sections.publish(parsed.sections);
        (*published).clone()
    }

    /// Look up one section by exact name
    pub fn get_section(&self, name: &str) -> Option<ConfigSection> {
        self.sections
            .current()
            .and_then(|sections| sections.get(name).cloned())
    }

    /// A copy of every section; changing it does not affect the store
    pub fn list_sections(&self) -> Sections {
        self.sections
            .current()
            .map(|sections| (*sections).clone())
            .unwrap_or_default()
    }

    pub fn section_exists(&self, name: &str) -> bool {
        self.sections
            .current()
            .is_some_and(|sections| sections.contains_key(name))
    }

    /// Whether any configuration has been loaded successfully
    pub fn is_loaded(&self) -> bool {
        self.sections.is_published()
    }
}
