//! How a dependency edge takes part in the consuming project.
//! 
//! Flags are set through keywords. The five common keywords (`default`, `private`, `dev`, `build`, `preprocess`)
//! are constants, every flag also has a rare `Flag`/`Flag-off` keyword pair which is only built the first time
//! a keyword outside the common set is parsed.

use std::borrow::Cow;

use once_cell::sync::Lazy;

/// A set of [`LibraryDependencyTypeFlag`] bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LibraryDependencyTypeFlag(u16);

impl LibraryDependencyTypeFlag {
	pub const NONE: Self = Self(0);
	pub const MAIN_REFERENCE: Self = Self(1);
	pub const MAIN_SOURCE: Self = Self(1 << 2);
	pub const MAIN_EXPORT: Self = Self(1 << 3);
	pub const PREPROCESS_REFERENCE: Self = Self(1 << 4);
	pub const RUNTIME_COMPONENT: Self = Self(1 << 5);
	pub const DEV_COMPONENT: Self = Self(1 << 6);
	pub const PREPROCESS_COMPONENT: Self = Self(1 << 7);
	pub const BECOMES_PACKAGE_DEPENDENCY: Self = Self(1 << 8);

	/// Every single flag along with the name used by its rare keyword.
	pub const NAMED: [(&'static str, Self); 8] = [
		("MainReference", Self::MAIN_REFERENCE),
		("MainSource", Self::MAIN_SOURCE),
		("MainExport", Self::MAIN_EXPORT),
		("PreprocessReference", Self::PREPROCESS_REFERENCE),
		("RuntimeComponent", Self::RUNTIME_COMPONENT),
		("DevComponent", Self::DEV_COMPONENT),
		("PreprocessComponent", Self::PREPROCESS_COMPONENT),
		("BecomesPackageDependency", Self::BECOMES_PACKAGE_DEPENDENCY),
	];

	pub const fn bits(&self) -> u16 { self.0 }
	pub const fn is_empty(&self) -> bool { self.0 == 0 }
	pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }
	pub const fn difference(self, other: Self) -> Self { Self(self.0 & !other.0) }

	/// All bits of `other` are set in `self`.
	pub const fn contains(&self, other: Self) -> bool {
		self.0 & other.0 == other.0
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		Self::NAMED.iter().filter(|(_, f)| self.contains(*f)).map(|(n, _)| *n)
	}
}

impl std::ops::BitOr for LibraryDependencyTypeFlag {
	type Output = Self;
	fn bitor(self, rhs: Self) -> Self::Output { self.union(rhs) }
}

impl std::ops::BitOrAssign for LibraryDependencyTypeFlag {
	fn bitor_assign(&mut self, rhs: Self) { *self = self.union(rhs) }
}

impl std::ops::BitAnd for LibraryDependencyTypeFlag {
	type Output = Self;
	fn bitand(self, rhs: Self) -> Self::Output { Self(self.0 & rhs.0) }
}

impl std::fmt::Debug for LibraryDependencyTypeFlag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return write!(f, "None")
		}
		write!(f, "{}", self.names().collect::<Vec<_>>().join(" | "))
	}
}

/// A keyword that adds and removes flags when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependencyTypeKeyword {
	value: Cow<'static, str>,
	flags_to_add: LibraryDependencyTypeFlag,
	flags_to_remove: LibraryDependencyTypeFlag,
}

/* Built once on first use, read only afterwards */
static RARE_KEYWORDS: Lazy<Vec<LibraryDependencyTypeKeyword>> = Lazy::new(|| {
	log::trace!("Populating rare dependency type keywords");
	let mut v = Vec::with_capacity(LibraryDependencyTypeFlag::NAMED.len() * 2 + 2);
	for (name, flag) in LibraryDependencyTypeFlag::NAMED {
		v.push(LibraryDependencyTypeKeyword {
			value: Cow::Borrowed(name),
			flags_to_add: flag,
			flags_to_remove: LibraryDependencyTypeFlag::NONE,
		});
		v.push(LibraryDependencyTypeKeyword {
			value: Cow::Owned(format!("{}-off", name)),
			flags_to_add: LibraryDependencyTypeFlag::NONE,
			flags_to_remove: flag,
		});
	}
	/* Older manifests spell the package flag after the package format */
	v.push(LibraryDependencyTypeKeyword {
		value: Cow::Borrowed("BecomesNupkgDependency"),
		flags_to_add: LibraryDependencyTypeFlag::BECOMES_PACKAGE_DEPENDENCY,
		flags_to_remove: LibraryDependencyTypeFlag::NONE,
	});
	v.push(LibraryDependencyTypeKeyword {
		value: Cow::Borrowed("BecomesNupkgDependency-off"),
		flags_to_add: LibraryDependencyTypeFlag::NONE,
		flags_to_remove: LibraryDependencyTypeFlag::BECOMES_PACKAGE_DEPENDENCY,
	});
	v
});

impl LibraryDependencyTypeKeyword {
	pub const DEFAULT: Self = Self::preset(
		"default",
		LibraryDependencyTypeFlag::MAIN_REFERENCE
			.union(LibraryDependencyTypeFlag::MAIN_SOURCE)
			.union(LibraryDependencyTypeFlag::MAIN_EXPORT)
			.union(LibraryDependencyTypeFlag::RUNTIME_COMPONENT)
			.union(LibraryDependencyTypeFlag::BECOMES_PACKAGE_DEPENDENCY),
	);

	/// Like `default` without exporting the dependency to consumers.
	pub const PRIVATE: Self = Self::preset(
		"private",
		LibraryDependencyTypeFlag::MAIN_REFERENCE
			.union(LibraryDependencyTypeFlag::MAIN_SOURCE)
			.union(LibraryDependencyTypeFlag::RUNTIME_COMPONENT)
			.union(LibraryDependencyTypeFlag::BECOMES_PACKAGE_DEPENDENCY),
	);

	pub const DEV: Self = Self::preset("dev", LibraryDependencyTypeFlag::DEV_COMPONENT);

	pub const BUILD: Self = Self::preset(
		"build",
		LibraryDependencyTypeFlag::MAIN_SOURCE.union(LibraryDependencyTypeFlag::PREPROCESS_COMPONENT),
	);

	pub const PREPROCESS: Self = Self::preset("preprocess", LibraryDependencyTypeFlag::PREPROCESS_REFERENCE);

	const fn preset(value: &'static str, flags_to_add: LibraryDependencyTypeFlag) -> Self {
		Self {
			value: Cow::Borrowed(value),
			flags_to_add,
			flags_to_remove: LibraryDependencyTypeFlag::NONE,
		}
	}

	/// # Errors
	/// [`UnknownDependencyType`](crate::Error::UnknownDependencyType) if `keyword` is not a preset or rare keyword.
	pub fn parse(keyword: &str) -> crate::Result<Self> {
		match keyword {
			"default" => return Ok(Self::DEFAULT),
			"private" => return Ok(Self::PRIVATE),
			"dev" => return Ok(Self::DEV),
			"build" => return Ok(Self::BUILD),
			"preprocess" => return Ok(Self::PREPROCESS),
			_ => {},
		}

		RARE_KEYWORDS.iter()
			.find(|kw| kw.value == keyword)
			.cloned()
			.ok_or_else(|| crate::Error::UnknownDependencyType(keyword.to_string()))
	}

	pub fn value(&self) -> &str { &self.value }
	pub fn flags_to_add(&self) -> LibraryDependencyTypeFlag { self.flags_to_add }
	pub fn flags_to_remove(&self) -> LibraryDependencyTypeFlag { self.flags_to_remove }
}

/// The flags an edge ends up with after applying its keywords in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LibraryDependencyType {
	flags: LibraryDependencyTypeFlag,
}

impl Default for LibraryDependencyType {
	fn default() -> Self {
		Self::from_keyword(&LibraryDependencyTypeKeyword::DEFAULT)
	}
}

impl LibraryDependencyType {
	pub fn from_flags(flags: LibraryDependencyTypeFlag) -> Self {
		Self { flags }
	}

	pub fn from_keyword(keyword: &LibraryDependencyTypeKeyword) -> Self {
		Self::from_flags(LibraryDependencyTypeFlag::NONE).combine(keyword.flags_to_add, keyword.flags_to_remove)
	}

	/// Applies each keyword in `keywords`, separated by commas or whitespace, starting from no flags.
	/// 
	/// An empty string gives the `default` flags.
	pub fn parse(keywords: &str) -> crate::Result<Self> {
		let mut keywords = keywords.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()).peekable();
		if keywords.peek().is_none() {
			return Ok(Self::default())
		}

		let mut t = Self::from_flags(LibraryDependencyTypeFlag::NONE);
		for keyword in keywords {
			let keyword = LibraryDependencyTypeKeyword::parse(keyword)?;
			t = t.combine(keyword.flags_to_add, keyword.flags_to_remove);
		}
		Ok(t)
	}

	pub fn flags(&self) -> LibraryDependencyTypeFlag { self.flags }

	pub fn contains(&self, flag: LibraryDependencyTypeFlag) -> bool {
		self.flags.contains(flag)
	}

	pub fn combine(self, add: LibraryDependencyTypeFlag, remove: LibraryDependencyTypeFlag) -> Self {
		Self { flags: self.flags.union(add).difference(remove) }
	}
}
