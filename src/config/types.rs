use crate::error::{Result, RewriteError};
use regex::bytes::Regex;
use serde::Deserialize;
use std::borrow::Cow;

/// Top-level document read from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDocument {
	/// Print the resolved command before executing it.
	#[serde(default, alias = "Debug")]
	pub debug: bool,

	/// Rewrite rules, applied in listed order.
	#[serde(default, alias = "Rewrites")]
	pub rewrites: Vec<RewriteEntry>,
}

/// A single uncompiled rewrite rule as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteEntry {
	/// Regex pattern searched for in each argument.
	#[serde(rename = "match", alias = "Match")]
	pub pattern: String,

	/// Replacement text. `$1`, `${name}` refer to capture groups.
	#[serde(alias = "Replace")]
	pub replace: String,
}

/// A compiled rewrite rule.
///
/// The regex is compiled once when the rule is built, so the pattern text and the
/// matcher can never disagree. It matches raw bytes, so arguments that are not
/// valid UTF-8 can still be searched.
#[derive(Debug, Clone)]
pub struct PatternRule {
	regex: Regex,
	replacement: String,
}

impl PatternRule {
	/// Compile `pattern` into a rule replacing every match with `replacement`.
	pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| RewriteError::RuleInvalid {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(PatternRule {
			regex,
			replacement: replacement.into(),
		})
	}

	/// The pattern as written in the config.
	pub fn pattern(&self) -> &str {
		self.regex.as_str()
	}

	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	pub fn replacement(&self) -> &str {
		&self.replacement
	}

	/// Replace all non-overlapping matches in `input`.
	///
	/// Returns `Cow::Borrowed` when nothing matched.
	pub fn apply<'a>(&self, input: &'a [u8]) -> Cow<'a, [u8]> {
		self.regex.replace_all(input, self.replacement.as_bytes())
	}
}

/// Effective configuration for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Compiled rules in listed order.
	pub rules: Vec<PatternRule>,

	/// Whether to print the exec line before launching.
	pub debug: bool,
}

impl Config {
	/// Compile every rule in the document.
	///
	/// A single bad pattern fails the whole config; no partial rule set is returned.
	pub fn from_document(document: ConfigDocument) -> Result<Self> {
		let rules = document
			.rewrites
			.into_iter()
			.map(|entry| PatternRule::new(&entry.pattern, entry.replace))
			.collect::<Result<Vec<_>>>()?;

		Ok(Config {
			rules,
			debug: document.debug,
		})
	}
}
