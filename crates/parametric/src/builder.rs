//! Compiles handler definitions into command units.

use std::path::PathBuf;
use std::sync::Arc;

use quill_invocation::{AllowAll, Authorizer, Description};
use thiserror::Error;
use tracing::debug;

use crate::binding::{ArgumentParser, IllegalParameterError, Injector};
use crate::handler::HandlerDefinition;
use crate::listener::InvokeListener;
use crate::spec::FlagPolicy;
use crate::unit::CommandUnit;

/// Errors raised while registering a command.
#[derive(Error, Debug)]
pub enum ConfigurationError {
	/// The handler was never declared as a command.
	#[error("handler '{handler}' lacks a command declaration")]
	MissingCommand { handler: String },
	/// The declaration names no alias to register the command under.
	#[error("command declaration of handler '{handler}' has no aliases")]
	NoAliases { handler: String },
	/// More parameter metadata entries than handler parameters.
	#[error("handler '{handler}' takes {declared} parameters but {described} are described")]
	ParameterMetadata {
		handler: String,
		declared: usize,
		described: usize,
	},
	/// The binding engine cannot bind a parameter.
	#[error("cannot bind parameter {index} of handler '{handler}': {source}")]
	IllegalParameter {
		handler: String,
		index: usize,
		#[source]
		source: IllegalParameterError,
	},
	#[error("invalid command manifest: {0}")]
	Manifest(#[from] toml::de::Error),
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
	/// A manifest entry names a handler that was not supplied.
	#[error("manifest entry refers to unknown handler '{0}'")]
	UnknownHandler(String),
	/// A supplied handler has no manifest entry.
	#[error("handler '{0}' has no manifest entry")]
	UnlinkedHandler(String),
	#[error("handler '{0}' is declared more than once")]
	DuplicateEntry(String),
}

/// Registration context shared by every command unit it builds: the type
/// bindings, the authorizer and the invoke listeners.
#[derive(Clone)]
pub struct ParametricBuilder {
	injector: Arc<Injector>,
	authorizer: Arc<dyn Authorizer>,
	listeners: Vec<Arc<dyn InvokeListener>>,
}

impl Default for ParametricBuilder {
	fn default() -> Self {
		Self::new(Injector::with_builtins())
	}
}

impl ParametricBuilder {
	/// Creates a builder that grants every permission and has no listeners.
	pub fn new(injector: Injector) -> Self {
		Self {
			injector: Arc::new(injector),
			authorizer: Arc::new(AllowAll),
			listeners: Vec::new(),
		}
	}

	pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
		self.authorizer = Arc::new(authorizer);
		self
	}

	/// Appends a listener; listeners run in the order they were added.
	pub fn listener(mut self, listener: impl InvokeListener + 'static) -> Self {
		self.listeners.push(Arc::new(listener));
		self
	}

	pub fn injector(&self) -> &Injector {
		&self.injector
	}

	/// Validates `definition` and compiles it into a command unit.
	///
	/// Nothing is invoked. Building the same definition with the same
	/// listeners always yields an equal description.
	pub fn build(&self, definition: HandlerDefinition) -> Result<CommandUnit, ConfigurationError> {
		let handler = definition.identity();
		let spec = definition
			.command_spec()
			.cloned()
			.ok_or_else(|| ConfigurationError::MissingCommand { handler: handler.clone() })?;
		if spec.aliases.is_empty() {
			return Err(ConfigurationError::NoAliases { handler });
		}

		let signature = definition.signature();
		if spec.parameters.len() > signature.len() {
			return Err(ConfigurationError::ParameterMetadata {
				handler,
				declared: signature.len(),
				described: spec.parameters.len(),
			});
		}

		let mut parser = ArgumentParser::builder(&self.injector);
		parser.flag_policy(FlagPolicy::from_spec(&spec));
		for (index, &key) in signature.iter().enumerate() {
			let mut param = spec.parameters.get(index).cloned().unwrap_or_default();
			param.name.get_or_insert_with(|| format!("arg{index}"));
			parser
				.add_parameter(key, param)
				.map_err(|source| ConfigurationError::IllegalParameter {
					handler: handler.clone(),
					index,
					source,
				})?;
		}
		let parser = parser.build();

		let description = self.listeners.iter().fold(
			Description::builder()
				.parameters(parser.user_parameters())
				.short_description(spec.short_description())
				.help(spec.help_text())
				.usage_override(spec.usage_override())
				.permissions(spec.perms.iter().cloned())
				.build(),
			|description, listener| listener.update_description(&spec, &parser, description),
		);

		debug!(
			command = spec.name().unwrap_or_default(),
			handler = %handler,
			parameters = parser.parameters().len(),
			permissions = description.permissions().len(),
			"built command unit"
		);

		Ok(CommandUnit::new(
			definition,
			spec,
			parser,
			description,
			self.authorizer.clone(),
			self.listeners.clone(),
		))
	}

	/// Builds every definition, stopping at the first failure.
	pub fn build_all(
		&self,
		definitions: impl IntoIterator<Item = HandlerDefinition>,
	) -> Result<Vec<CommandUnit>, ConfigurationError> {
		definitions.into_iter().map(|def| self.build(def)).collect()
	}
}
