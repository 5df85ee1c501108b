use std::fmt;

/// A user-visible parameter of a command, as shown in usage lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
	/// Display name.
	pub name: String,
	/// Whether the parameter may be omitted.
	pub optional: bool,
	/// Flag character, for switch and value flags.
	pub flag: Option<char>,
	/// Whether the flag consumes a value (`-f <value>`).
	pub value_flag: bool,
	/// Tokens used when the parameter is omitted.
	pub default: Vec<String>,
}

impl Parameter {
	/// Creates a required positional parameter.
	pub fn positional(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Returns whether the caller may leave this parameter out.
	pub fn is_omittable(&self) -> bool {
		self.optional || self.flag.is_some() || !self.default.is_empty()
	}
}

impl fmt::Display for Parameter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.flag {
			Some(flag) if self.value_flag => write!(f, "[-{flag} <{}>]", self.name),
			Some(flag) => write!(f, "[-{flag}]"),
			None if self.is_omittable() => write!(f, "[{}]", self.name),
			None => write!(f, "<{}>", self.name),
		}
	}
}

/// Immutable help model of a command.
///
/// Built once when a command unit is sealed and handed out by reference
/// afterwards. Use [`Description::to_builder`] to derive a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description {
	parameters: Vec<Parameter>,
	short_description: Option<String>,
	help: Option<String>,
	usage_override: Option<String>,
	permissions: Vec<String>,
}

impl Description {
	pub fn builder() -> DescriptionBuilder {
		DescriptionBuilder::default()
	}

	/// User-visible parameters in declaration order.
	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	/// One-line summary, if declared.
	pub fn short_description(&self) -> Option<&str> {
		self.short_description.as_deref()
	}

	/// Long help text; falls back to the short description when not declared.
	pub fn help(&self) -> Option<&str> {
		self.help.as_deref()
	}

	pub fn usage_override(&self) -> Option<&str> {
		self.usage_override.as_deref()
	}

	/// Permissions in declaration order. Empty means open to every caller.
	pub fn permissions(&self) -> &[String] {
		&self.permissions
	}

	/// Returns the usage line: the override when present, otherwise one
	/// fragment per parameter.
	pub fn usage(&self) -> String {
		if let Some(usage) = &self.usage_override {
			return usage.clone();
		}
		self.parameters
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Returns a builder seeded with this description's fields.
	pub fn to_builder(&self) -> DescriptionBuilder {
		DescriptionBuilder {
			parameters: self.parameters.clone(),
			short_description: self.short_description.clone(),
			help: self.help.clone(),
			usage_override: self.usage_override.clone(),
			permissions: self.permissions.clone(),
		}
	}
}

/// Builder for [`Description`].
#[derive(Debug, Clone, Default)]
pub struct DescriptionBuilder {
	parameters: Vec<Parameter>,
	short_description: Option<String>,
	help: Option<String>,
	usage_override: Option<String>,
	permissions: Vec<String>,
}

impl DescriptionBuilder {
	pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
		self.parameters = parameters;
		self
	}

	pub fn short_description(mut self, text: Option<String>) -> Self {
		self.short_description = text;
		self
	}

	pub fn help(mut self, text: Option<String>) -> Self {
		self.help = text;
		self
	}

	pub fn usage_override(mut self, usage: Option<String>) -> Self {
		self.usage_override = usage;
		self
	}

	pub fn permissions<I, S>(mut self, permissions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.permissions = permissions.into_iter().map(Into::into).collect();
		self
	}

	pub fn build(self) -> Description {
		Description {
			parameters: self.parameters,
			short_description: self.short_description,
			help: self.help,
			usage_override: self.usage_override,
			permissions: self.permissions,
		}
	}
}

#[cfg(test)]
mod tests;
