//! TOML command manifests.
//!
//! A manifest declares commands out of line, keyed by handler name:
//!
//! ```toml
//! [[command]]
//! handler = "greet"
//! aliases = ["greet", "hi"]
//! desc = "Greets someone"
//! perms = ["greet.use"]
//!
//! [[command.parameters]]
//! name = "target"
//! ```
//!
//! [`CommandManifest::link`] pairs each entry with the handler definition of
//! the same name.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::ConfigurationError;
use crate::handler::HandlerDefinition;
use crate::spec::CommandSpec;

/// A parsed command manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandManifest {
	#[serde(rename = "command", default)]
	pub commands: Vec<ManifestEntry>,
}

/// One `[[command]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
	/// Name of the handler definition this entry declares.
	pub handler: String,
	#[serde(flatten)]
	pub spec: CommandSpec,
}

impl CommandManifest {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigurationError> {
		Ok(toml::from_str(input)?)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigurationError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let manifest = Self::from_toml_str(&input)?;
		debug!(path = %path.display(), commands = manifest.commands.len(), "loaded command manifest");
		Ok(manifest)
	}

	/// Attaches each entry's declaration to the definition it names.
	///
	/// Every entry must name a supplied definition and every definition must
	/// have exactly one entry. Definitions come back in manifest order.
	pub fn link(
		&self,
		definitions: impl IntoIterator<Item = HandlerDefinition>,
	) -> Result<Vec<HandlerDefinition>, ConfigurationError> {
		let mut by_name = HashMap::new();
		for def in definitions {
			let name = def.name().to_owned();
			if by_name.insert(name.clone(), def).is_some() {
				return Err(ConfigurationError::DuplicateEntry(name));
			}
		}

		let mut linked = Vec::with_capacity(self.commands.len());
		let mut seen = HashSet::new();
		for entry in &self.commands {
			if !seen.insert(entry.handler.as_str()) {
				return Err(ConfigurationError::DuplicateEntry(entry.handler.clone()));
			}
			let def = by_name
				.remove(&entry.handler)
				.ok_or_else(|| ConfigurationError::UnknownHandler(entry.handler.clone()))?;
			linked.push(def.command(entry.spec.clone()));
		}

		if let Some(name) = by_name.into_keys().min() {
			return Err(ConfigurationError::UnlinkedHandler(name));
		}
		Ok(linked)
	}
}
