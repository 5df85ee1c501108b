use std::collections::BTreeSet;

use quill_invocation::{ArgumentError, CommandArgs, Namespace, Parameter};

use super::{IllegalParameterError, Injector, ParameterDescriptor, ParameterKind, TypeKey, Value};
use crate::spec::{FlagPolicy, ParameterSpec};

/// Binding plan for one handler: ordered parameter descriptors plus the
/// command's flag policy.
#[derive(Debug, Clone)]
pub struct ArgumentParser {
	parameters: Vec<ParameterDescriptor>,
	flag_policy: FlagPolicy,
	value_flags: BTreeSet<char>,
}

impl ArgumentParser {
	pub fn builder(injector: &Injector) -> ArgumentParserBuilder<'_> {
		ArgumentParserBuilder {
			injector,
			parameters: Vec::new(),
			flag_policy: FlagPolicy::default(),
		}
	}

	/// All descriptors in handler parameter order.
	pub fn parameters(&self) -> &[ParameterDescriptor] {
		&self.parameters
	}

	/// Descriptors shown to users, in their description form.
	pub fn user_parameters(&self) -> Vec<Parameter> {
		self.parameters
			.iter()
			.filter(|p| p.is_user_facing())
			.map(ParameterDescriptor::to_parameter)
			.collect()
	}

	pub fn flag_policy(&self) -> &FlagPolicy {
		&self.flag_policy
	}

	/// Flag characters that take a value.
	pub fn value_flags(&self) -> &BTreeSet<char> {
		&self.value_flags
	}

	/// Tokenizes `raw` with this plan's value flags.
	pub fn parse_args<S: AsRef<str>>(&self, raw: &[S]) -> Result<CommandArgs, ArgumentError> {
		CommandArgs::parse(raw, &self.value_flags)
	}

	/// Resolves `raw` into one value per descriptor, in order.
	///
	/// Fails when an argument is missing or malformed, when positional
	/// arguments are left over, or when the flag policy rejects a leftover flag.
	pub fn resolve<S: AsRef<str>>(&self, raw: &[S], namespace: &Namespace) -> Result<Vec<Value>, ArgumentError> {
		let mut args = self.parse_args(raw)?;
		let mut values = Vec::with_capacity(self.parameters.len());

		for descriptor in &self.parameters {
			let modifiers = &descriptor.spec().modifiers;
			let value: Value = match descriptor.kind() {
				ParameterKind::Provided => descriptor.provider().get(&mut args, namespace, modifiers)?,
				ParameterKind::Switch(flag) => Box::new(args.take_flag(flag).is_some()),
				ParameterKind::ValueFlag(flag) => match args.take_flag(flag) {
					Some(Some(value)) => {
						let mut value = CommandArgs::from_positional([value]);
						descriptor.provider().get(&mut value, namespace, modifiers)?
					}
					_ => descriptor.absent(namespace)?,
				},
				ParameterKind::Positional if args.has_next() => {
					descriptor.provider().get(&mut args, namespace, modifiers)?
				}
				ParameterKind::Positional => descriptor.absent(namespace)?,
			};
			values.push(value);
		}

		if args.has_next() {
			return Err(ArgumentError::UnusedArguments(args.take_remaining()));
		}

		let rejected: String = args
			.unconsumed_flags()
			.filter(|&flag| !self.flag_policy.permits(flag))
			.collect();
		if !rejected.is_empty() {
			return Err(ArgumentError::UnusedFlags(rejected));
		}

		Ok(values)
	}
}

/// Builder for [`ArgumentParser`].
#[derive(Debug)]
pub struct ArgumentParserBuilder<'a> {
	injector: &'a Injector,
	parameters: Vec<ParameterDescriptor>,
	flag_policy: FlagPolicy,
}

impl ArgumentParserBuilder<'_> {
	/// Compiles and appends a parameter.
	pub fn add_parameter(&mut self, key: TypeKey, spec: ParameterSpec) -> Result<&mut Self, IllegalParameterError> {
		let descriptor = self.injector.compile(key, spec)?;
		if let Some(flag) = descriptor.flag()
			&& self.parameters.iter().any(|p| p.flag() == Some(flag))
		{
			return Err(IllegalParameterError::DuplicateFlag { flag });
		}
		self.parameters.push(descriptor);
		Ok(self)
	}

	pub fn flag_policy(&mut self, policy: FlagPolicy) -> &mut Self {
		self.flag_policy = policy;
		self
	}

	pub fn build(self) -> ArgumentParser {
		let value_flags = self
			.parameters
			.iter()
			.filter_map(|p| match p.kind() {
				ParameterKind::ValueFlag(flag) => Some(flag),
				_ => None,
			})
			.collect();
		ArgumentParser {
			parameters: self.parameters,
			flag_policy: self.flag_policy,
			value_flags,
		}
	}
}
