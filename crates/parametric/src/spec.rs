//! Declarative command metadata.
//!
//! A [`CommandSpec`] is what marks a handler as a command. It is plain data so
//! it can be written inline in Rust or loaded from a manifest.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Command declaration attached to a handler definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
	/// Names the command is registered under; the first is its primary name.
	pub aliases: Vec<String>,
	/// One-line summary.
	pub desc: String,
	/// Long help text; falls back to `desc` when empty.
	pub help: String,
	/// Usage line replacing the generated one.
	pub usage: String,
	/// Permissions, any one of which admits the caller.
	pub perms: Vec<String>,
	/// Flag characters accepted without being bound to a parameter.
	pub flags: String,
	/// Accept any flag, bound or not.
	pub any_flags: bool,
	/// Per-parameter metadata in declaration order. May be shorter than the
	/// handler's parameter list; missing entries use defaults.
	pub parameters: Vec<ParameterSpec>,
	/// Free-form metadata for invoke listeners.
	pub metadata: BTreeMap<String, String>,
}

impl CommandSpec {
	/// Creates a declaration with the given aliases.
	pub fn new<I, S>(aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			aliases: aliases.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	pub fn desc(mut self, desc: impl Into<String>) -> Self {
		self.desc = desc.into();
		self
	}

	pub fn help(mut self, help: impl Into<String>) -> Self {
		self.help = help.into();
		self
	}

	pub fn usage(mut self, usage: impl Into<String>) -> Self {
		self.usage = usage.into();
		self
	}

	pub fn perms<I, S>(mut self, perms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.perms = perms.into_iter().map(Into::into).collect();
		self
	}

	pub fn flags(mut self, flags: impl Into<String>) -> Self {
		self.flags = flags.into();
		self
	}

	pub fn any_flags(mut self, any_flags: bool) -> Self {
		self.any_flags = any_flags;
		self
	}

	pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
		self.parameters.push(parameter);
		self
	}

	pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}

	/// Primary command name.
	pub fn name(&self) -> Option<&str> {
		self.aliases.first().map(String::as_str)
	}

	fn text(value: &str) -> Option<String> {
		(!value.is_empty()).then(|| value.to_owned())
	}

	pub(crate) fn short_description(&self) -> Option<String> {
		Self::text(&self.desc)
	}

	pub(crate) fn help_text(&self) -> Option<String> {
		Self::text(&self.help).or_else(|| self.short_description())
	}

	pub(crate) fn usage_override(&self) -> Option<String> {
		Self::text(&self.usage)
	}
}

/// Metadata for one handler parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSpec {
	/// Display name; defaults to `argN`.
	pub name: Option<String>,
	/// Whether the caller may omit the parameter.
	pub optional: bool,
	/// Tokens bound when the parameter is omitted.
	pub default: Vec<String>,
	/// Binds the parameter to a flag instead of a position.
	pub flag: Option<char>,
	/// Provider hints such as `text`.
	pub modifiers: Vec<String>,
}

impl ParameterSpec {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}

	pub fn default_value<I, S>(mut self, tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default = tokens.into_iter().map(Into::into).collect();
		self
	}

	pub fn flag(mut self, flag: char) -> Self {
		self.flag = Some(flag);
		self
	}

	pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
		self.modifiers.push(modifier.into());
		self
	}

	pub fn has_modifier(&self, modifier: &str) -> bool {
		self.modifiers.iter().any(|m| m == modifier)
	}

	pub(crate) fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or("value")
	}
}

/// Rule set for flags presented at invocation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagPolicy {
	ignore_unused: bool,
	declared: BTreeSet<char>,
}

impl FlagPolicy {
	/// Accepts every flag.
	pub fn any() -> Self {
		Self {
			ignore_unused: true,
			declared: BTreeSet::new(),
		}
	}

	/// Accepts only consumed flags and the given characters.
	pub fn whitelist(flags: impl IntoIterator<Item = char>) -> Self {
		Self {
			ignore_unused: false,
			declared: flags.into_iter().collect(),
		}
	}

	pub fn from_spec(spec: &CommandSpec) -> Self {
		if spec.any_flags {
			Self::any()
		} else {
			Self::whitelist(spec.flags.chars())
		}
	}

	pub fn ignores_unused(&self) -> bool {
		self.ignore_unused
	}

	pub fn declared(&self) -> &BTreeSet<char> {
		&self.declared
	}

	/// Returns whether an unconsumed `flag` may be left over.
	pub fn permits(&self, flag: char) -> bool {
		self.ignore_unused || self.declared.contains(&flag)
	}
}
