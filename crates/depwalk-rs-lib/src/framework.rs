//! Target framework monikers.
//! 
//! A moniker names the runtime a walk resolves for. It is written either in long form,
//! `.NETFramework,Version=v4.5.1[,Profile=Client]`, or in short form, `net451`.
//! Both parse to the same value and [`Display`](std::fmt::Display) always gives the long form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::version::SemanticVersion;

static LONG_FORM: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\s*([^,]+?)\s*,\s*Version=v?([0-9]+(?:\.[0-9]+)*)\s*(?:,\s*Profile=(.+?))?\s*$").expect("long form regex should compile")
});
static SHORT_FORM: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^\s*([a-zA-Z]+)([0-9]+(?:\.[0-9]+)*)?\s*$").expect("short form regex should compile")
});

/// (short name, identifier)
const KNOWN_IDENTIFIERS: &[(&str, &str)] = &[
	("net", ".NETFramework"),
	("netcore", ".NETCore"),
	("dnx", "DNX"),
	("dnxcore", "DNXCore"),
	("aspnet", "Asp.Net"),
	("aspnetcore", "Asp.NetCore"),
	("dotnet", ".NETPlatform"),
	("portable", ".NETPortable"),
];

/// Frameworks able to load assemblies out of a machine wide cache.
const DESKTOP_IDENTIFIERS: &[&str] = &[".NETFramework", "DNX", "Asp.Net"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkMoniker {
	identifier: String,
	version: SemanticVersion,
	profile: Option<String>,
}

impl FrameworkMoniker {
	pub fn new(identifier: impl Into<String>, version: SemanticVersion, profile: Option<String>) -> Self {
		Self { identifier: identifier.into(), version, profile }
	}

	pub fn parse(s: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;
		let s = s.as_ref();

		if let Some(caps) = LONG_FORM.captures(s) {
			return Ok(Self {
				identifier: caps[1].to_string(),
				version: parse_framework_version(&caps[2])?,
				profile: caps.get(3).map(|m| m.as_str().to_string()),
			})
		}

		if let Some(caps) = SHORT_FORM.captures(s) {
			let short = caps[1].to_lowercase();
			let identifier = KNOWN_IDENTIFIERS.iter()
				.find(|(name, _)| *name == short)
				.map(|(_, id)| id.to_string())
				.ok_or_else(|| Parse(format!("unknown framework `{}`", s.trim())))?;

			let version = match caps.get(2).map(|m| m.as_str()) {
				None => SemanticVersion::new(0, 0, 0),
				/* `451` is shorthand for 4.5.1 */
				Some(digits) if !digits.contains('.') => {
					parse_framework_version(&digits.chars().map(String::from).collect::<Vec<_>>().join("."))?
				},
				Some(dotted) => parse_framework_version(dotted)?,
			};

			return Ok(Self { identifier, version, profile: None })
		}

		Err(Parse(format!("`{}` is not a framework moniker", s)))
	}

	pub fn identifier(&self) -> &str { &self.identifier }
	pub fn version(&self) -> &SemanticVersion { &self.version }
	pub fn profile(&self) -> Option<&str> { self.profile.as_deref() }

	pub fn is_desktop(&self) -> bool {
		DESKTOP_IDENTIFIERS.contains(&self.identifier.as_str())
	}

	/// Short form such as `dnx451`, `None` when the identifier has no short name.
	pub fn short_name(&self) -> Option<String> {
		let (short, _) = KNOWN_IDENTIFIERS.iter().find(|(_, id)| *id == self.identifier)?;
		let components = self.version_components();
		let version = if components.iter().all(|c| *c < 10) {
			components.iter().map(|c| c.to_string()).collect::<String>()
		} else {
			components.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(".")
		};
		Some(format!("{}{}", short, version))
	}

	/// The version as written in the long form, `4.5.1` or `5.0`.
	pub fn version_string(&self) -> String {
		self.version_components().iter().map(|c| c.to_string()).collect::<Vec<_>>().join(".")
	}

	/// `major.minor` plus any trailing non-zero components.
	fn version_components(&self) -> Vec<u32> {
		let mut components = vec![self.version.major(), self.version.minor(), self.version.patch(), self.version.revision()];
		while components.len() > 2 && components.last() == Some(&0) {
			components.pop();
		}
		components
	}
}

fn parse_framework_version(s: &str) -> crate::Result<SemanticVersion> {
	/* Frameworks are allowed a single component version, `v4` */
	if s.contains('.') {
		SemanticVersion::parse(s)
	} else {
		SemanticVersion::parse(format!("{}.0", s))
	}
}

impl TryFrom<String> for FrameworkMoniker {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl From<FrameworkMoniker> for String {
	fn from(value: FrameworkMoniker) -> Self { value.to_string() }
}

impl std::str::FromStr for FrameworkMoniker {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl std::fmt::Display for FrameworkMoniker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{},Version=v{}", self.identifier, self.version_string())?;
		if let Some(profile) = &self.profile {
			write!(f, ",Profile={}", profile)?;
		}
		Ok(())
	}
}
