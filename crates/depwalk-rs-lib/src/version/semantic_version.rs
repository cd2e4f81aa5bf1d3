use serde::{Serialize, Deserialize};
use try_map::FallibleMapExt;

/// A concrete library version.
/// 
/// # Format
/// `MAJOR`.`MINOR`[.`PATCH`[.`REVISION`]][-`PRERELEASE`]
/// 
/// Missing numeric components are zero so `1.2` and `1.2.0` are equal.
/// A pre-release sorts before the release it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
	major: u32,
	minor: u32,
	patch: u32,
	revision: u32,
	prerelease: Option<String>,
}

impl SemanticVersion {
	pub fn new(major: u32, minor: u32, patch: u32) -> Self {
		Self { major, minor, patch, revision: 0, prerelease: None }
	}

	/// # Errors
	/// A [`Parse`](crate::Error::Parse) error when
	/// - There are fewer than two or more than four numeric components.
	/// - A component can't be parsed as an integer.
	/// - The pre-release tag is present but empty.
	pub fn parse(s: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;
		let s = s.as_ref().trim();

		let (core, prerelease) = match s.split_once('-') {
			Some((_, "")) => return Err(Parse(format!("empty pre-release tag in version `{}`", s))),
			Some((core, pre)) => (core, Some(pre.to_string())),
			None => (s, None),
		};

		let components = core.split('.').collect::<Vec<_>>();
		if components.len() < 2 || components.len() > 4 {
			return Err(Parse(format!("too many/few components in version `{}`", s)))
		}

		let parse_component = |c: &&str| c.parse::<u32>().map_err(|_| Parse(format!("`{}` in version `{}` is not a number", c, s)));

		let major = parse_component(&components[0])?;
		let minor = parse_component(&components[1])?;
		let patch = components.get(2).try_map(parse_component)?.unwrap_or(0);
		let revision = components.get(3).try_map(parse_component)?.unwrap_or(0);

		Ok(Self { major, minor, patch, revision, prerelease })
	}

	pub fn major(&self) -> u32 { self.major }
	pub fn minor(&self) -> u32 { self.minor }
	pub fn patch(&self) -> u32 { self.patch }
	pub fn revision(&self) -> u32 { self.revision }
	pub fn prerelease(&self) -> Option<&str> { self.prerelease.as_deref() }
	pub fn is_prerelease(&self) -> bool { self.prerelease.is_some() }

	pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
		self.prerelease = Some(prerelease.into());
		self
	}

	/// `1.0.0`, `1.0.0.4` or `1.0.0-beta`. The revision is only written when non-zero.
	pub fn to_normalized_string(&self) -> String {
		let mut s = format!("{}.{}.{}", self.major, self.minor, self.patch);
		if self.revision != 0 {
			s += &format!(".{}", self.revision);
		}
		if let Some(pre) = &self.prerelease {
			s += "-";
			s += pre;
		}
		s
	}
}

impl TryFrom<String> for SemanticVersion {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl TryFrom<&str> for SemanticVersion {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl From<SemanticVersion> for String {
	fn from(value: SemanticVersion) -> Self { value.to_normalized_string() }
}

impl std::str::FromStr for SemanticVersion {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl Ord for SemanticVersion {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		use std::cmp::Ordering;
		(self.major, self.minor, self.patch, self.revision)
			.cmp(&(other.major, other.minor, other.patch, other.revision))
			.then_with(|| match (&self.prerelease, &other.prerelease) {
				(None, None) => Ordering::Equal,
				(None, Some(_)) => Ordering::Greater,
				(Some(_), None) => Ordering::Less,
				(Some(lhs), Some(rhs)) => lhs.cmp(rhs),
			})
	}
}

impl PartialOrd for SemanticVersion {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for SemanticVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_normalized_string())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn v(s: &str) -> SemanticVersion { SemanticVersion::parse(s).unwrap() }

	#[test] fn versions_are_not_compared_lexically() { assert!(v("1.2.4") < v("1.2.10")) }
	#[test] fn missing_components_are_zero() { assert_eq!(v("1.2"), v("1.2.0.0")) }
	#[test] fn prerelease_is_lt_release() { assert!(v("1.0.0-beta") < v("1.0.0")) }
	#[test] fn prerelease_is_gt_previous_release() { assert!(v("1.0.0-beta") > v("0.9.9")) }
	#[test] fn revision_is_respected() { assert!(v("1.0.0.1") > v("1.0.0")) }
	#[test] fn normalized_string_drops_zero_revision() { assert_eq!(v("1.0.0.0").to_normalized_string(), "1.0.0") }
	#[test] fn normalized_string_keeps_prerelease() { assert_eq!(v("2.1-rc1").to_normalized_string(), "2.1.0-rc1") }

	#[test]
	fn malformed_versions_fail() {
		assert!(SemanticVersion::parse("1").is_err());
		assert!(SemanticVersion::parse("1.2.3.4.5").is_err());
		assert!(SemanticVersion::parse("1.x").is_err());
		assert!(SemanticVersion::parse("1.0.0-").is_err());
	}
}
