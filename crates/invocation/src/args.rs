//! Flag-aware view over tokenized command arguments.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::ArgumentError;

/// Tokenized arguments split into positional values and flags.
///
/// Flags are single characters grouped behind a dash (`-abc`). Characters
/// listed as value flags take the following token as their value and must
/// end their group. A bare `--` stops flag parsing, and tokens such as `-5`
/// that do not consist solely of letters stay positional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
	positional: VecDeque<String>,
	flags: BTreeMap<char, Option<String>>,
	consumed: BTreeSet<char>,
}

impl CommandArgs {
	/// Parses `tokens`, treating characters in `value_flags` as flags that take a value.
	pub fn parse<S: AsRef<str>>(tokens: &[S], value_flags: &BTreeSet<char>) -> Result<Self, ArgumentError> {
		let mut args = Self::default();
		let mut iter = tokens.iter().map(AsRef::as_ref);
		let mut flags_done = false;

		while let Some(token) = iter.next() {
			if flags_done || !is_flag_group(token) {
				args.positional.push_back(token.to_owned());
				continue;
			}
			if token == "--" {
				flags_done = true;
				continue;
			}

			let group: Vec<char> = token.chars().skip(1).collect();
			for (i, &flag) in group.iter().enumerate() {
				if !value_flags.contains(&flag) {
					args.flags.insert(flag, None);
					continue;
				}
				// A value flag must close its group; `-vx value` is ambiguous.
				if i + 1 != group.len() {
					return Err(ArgumentError::MissingFlagValue(flag));
				}
				let value = iter.next().ok_or(ArgumentError::MissingFlagValue(flag))?;
				args.flags.insert(flag, Some(value.to_owned()));
			}
		}

		Ok(args)
	}

	/// Creates arguments holding only positional values.
	pub fn from_positional<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			positional: values.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	pub fn has_next(&self) -> bool {
		!self.positional.is_empty()
	}

	pub fn peek(&self) -> Option<&str> {
		self.positional.front().map(String::as_str)
	}

	/// Consumes the next positional value; `name` labels the error when none is left.
	pub fn next(&mut self, name: &str) -> Result<String, ArgumentError> {
		self.positional
			.pop_front()
			.ok_or_else(|| ArgumentError::MissingArgument(name.to_owned()))
	}

	/// Consumes every remaining positional value.
	pub fn take_remaining(&mut self) -> Vec<String> {
		self.positional.drain(..).collect()
	}

	pub fn remaining(&self) -> usize {
		self.positional.len()
	}

	/// Consumes flag `flag`. Returns `None` when absent, `Some(None)` for a
	/// switch and `Some(Some(value))` for a value flag.
	pub fn take_flag(&mut self, flag: char) -> Option<Option<String>> {
		let value = self.flags.get(&flag)?.clone();
		self.consumed.insert(flag);
		Some(value)
	}

	/// Returns whether `flag` was presented, without consuming it.
	pub fn has_flag(&self, flag: char) -> bool {
		self.flags.contains_key(&flag)
	}

	/// Flags presented but not consumed, in character order.
	pub fn unconsumed_flags(&self) -> impl Iterator<Item = char> + '_ {
		self.flags
			.keys()
			.copied()
			.filter(|flag| !self.consumed.contains(flag))
	}
}

fn is_flag_group(token: &str) -> bool {
	token == "--"
		|| (token.len() > 1
			&& token.starts_with('-')
			&& token[1..].chars().all(char::is_alphabetic))
}

/// Splits a command line on whitespace, honoring single and double quotes.
///
/// Quotes group their content into one argument and are removed. Adjacent
/// quoted and unquoted text joins into a single argument (`a"b c"` is `ab c`).
pub fn split_arguments(input: &str) -> Result<Vec<String>, ArgumentError> {
	let mut out = Vec::new();
	let mut current = String::new();
	let mut in_token = false;
	let mut chars = input.char_indices();

	while let Some((i, c)) = chars.next() {
		match c {
			'"' | '\'' => {
				in_token = true;
				let mut closed = false;
				for (_, inner) in chars.by_ref() {
					if inner == c {
						closed = true;
						break;
					}
					current.push(inner);
				}
				if !closed {
					return Err(ArgumentError::UnterminatedQuote(i));
				}
			}
			c if c.is_whitespace() => {
				if in_token {
					out.push(std::mem::take(&mut current));
					in_token = false;
				}
			}
			c => {
				in_token = true;
				current.push(c);
			}
		}
	}
	if in_token {
		out.push(current);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
