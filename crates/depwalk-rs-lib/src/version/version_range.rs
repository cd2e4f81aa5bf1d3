use serde::{Serialize, Deserialize};

use super::SemanticVersion;

/// A constraint on the versions of a library that may satisfy a request.
/// 
/// # Format
/// - `1.0.0`: the version or anything above it.
/// - `[1.0.0, 2.0.0)`: interval notation, `[`/`]` are inclusive and `(`/`)` exclusive.
/// - `(, 2.0.0]`, `[1.0.0, )`: open ended intervals.
/// - `[1.0.0]`: exactly this version.
/// - `*`: any version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersionRange {
	min_version: Option<SemanticVersion>,
	is_min_inclusive: bool,
	max_version: Option<SemanticVersion>,
	is_max_inclusive: bool,
}

impl SemanticVersionRange {
	/// Any version.
	pub fn any() -> Self {
		Self { min_version: None, is_min_inclusive: false, max_version: None, is_max_inclusive: false }
	}

	/// `version` or anything above it.
	pub fn at_least(version: SemanticVersion) -> Self {
		Self { min_version: Some(version), is_min_inclusive: true, max_version: None, is_max_inclusive: false }
	}

	pub fn exact(version: SemanticVersion) -> Self {
		Self { min_version: Some(version.clone()), is_min_inclusive: true, max_version: Some(version), is_max_inclusive: true }
	}

	/// `[min, max)`
	pub fn between(min: SemanticVersion, max: SemanticVersion) -> Self {
		Self { min_version: Some(min), is_min_inclusive: true, max_version: Some(max), is_max_inclusive: false }
	}

	pub fn parse(s: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;
		let s = s.as_ref().trim();

		if s.is_empty() || s == "*" {
			return Ok(Self::any())
		}

		let first = s.chars().next().expect("string confirmed not empty");
		if first != '[' && first != '(' {
			return Ok(Self::at_least(SemanticVersion::parse(s)?))
		}

		let last = s.chars().last().expect("string confirmed not empty");
		if s.len() < 2 || (last != ']' && last != ')') {
			return Err(Parse(format!("version range `{}` is not closed", s)))
		}

		let is_min_inclusive = first == '[';
		let is_max_inclusive = last == ']';
		let inner = s[1..s.len() - 1].trim();

		let parse_side = |side: &str| -> crate::Result<Option<SemanticVersion>> {
			let side = side.trim();
			if side.is_empty() { Ok(None) } else { SemanticVersion::parse(side).map(Some) }
		};

		let range = match inner.split_once(',') {
			Some((min, max)) => Self {
				min_version: parse_side(min)?,
				is_min_inclusive,
				max_version: parse_side(max)?,
				is_max_inclusive,
			},
			None => {
				/* `[1.0.0]` is the only valid form without a comma */
				if !(is_min_inclusive && is_max_inclusive) || inner.is_empty() {
					return Err(Parse(format!("version range `{}` must contain a comma or be an exact version", s)))
				}
				Self::exact(SemanticVersion::parse(inner)?)
			},
		};

		if let (Some(min), Some(max)) = (&range.min_version, &range.max_version) {
			if min > max || (min == max && !(range.is_min_inclusive && range.is_max_inclusive)) {
				return Err(Parse(format!("version range `{}` can never be satisfied", s)))
			}
		}

		Ok(range)
	}

	pub fn min_version(&self) -> Option<&SemanticVersion> { self.min_version.as_ref() }
	pub fn is_min_inclusive(&self) -> bool { self.is_min_inclusive }
	pub fn max_version(&self) -> Option<&SemanticVersion> { self.max_version.as_ref() }
	pub fn is_max_inclusive(&self) -> bool { self.is_max_inclusive }

	pub fn satisfies(&self, version: &SemanticVersion) -> bool {
		let above_min = match &self.min_version {
			Some(min) if self.is_min_inclusive => version >= min,
			Some(min) => version > min,
			None => true,
		};
		let below_max = match &self.max_version {
			Some(max) if self.is_max_inclusive => version <= max,
			Some(max) => version < max,
			None => true,
		};
		above_min && below_max
	}
}

impl Default for SemanticVersionRange {
	fn default() -> Self { Self::any() }
}

impl TryFrom<String> for SemanticVersionRange {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl From<SemanticVersionRange> for String {
	fn from(value: SemanticVersionRange) -> Self { value.to_string() }
}

impl std::str::FromStr for SemanticVersionRange {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl std::fmt::Display for SemanticVersionRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match (&self.min_version, &self.max_version) {
			(None, None) => write!(f, "*"),
			(Some(min), Some(max)) if min == max && self.is_min_inclusive && self.is_max_inclusive => write!(f, "[{}]", min),
			(min, max) => {
				write!(f, "{}", if self.is_min_inclusive { '[' } else { '(' })?;
				if let Some(min) = min { write!(f, "{}", min)?; }
				write!(f, ", ")?;
				if let Some(max) = max { write!(f, "{}", max)?; }
				write!(f, "{}", if self.is_max_inclusive { ']' } else { ')' })
			},
		}
	}
}
