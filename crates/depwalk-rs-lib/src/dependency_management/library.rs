/// A loadable binary, `Name[, Version=1.0.0.0][, Culture=neutral][, PublicKeyToken=...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyName {
	pub name: String,
	pub version: Option<String>,
	pub culture: Option<String>,
	pub public_key_token: Option<String>,
}

impl AssemblyName {
	/// Unknown parts of the display name are ignored.
	pub fn parse(s: &str) -> Self {
		let mut parts = s.split(',').map(str::trim);
		let mut name = AssemblyName {
			name: parts.next().unwrap_or_default().to_string(),
			version: None,
			culture: None,
			public_key_token: None,
		};

		for part in parts {
			if let Some((key, value)) = part.split_once('=') {
				let value = Some(value.trim().to_string());
				match key.trim() {
					"Version" => name.version = value,
					"Culture" => name.culture = value,
					"PublicKeyToken" => name.public_key_token = value,
					_ => {},
				}
			}
		}
		name
	}
}

impl std::fmt::Display for AssemblyName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)?;
		if let Some(v) = &self.version { write!(f, ", Version={}", v)?; }
		if let Some(c) = &self.culture { write!(f, ", Culture={}", c)?; }
		if let Some(t) = &self.public_key_token { write!(f, ", PublicKeyToken={}", t)?; }
		Ok(())
	}
}

/// Information about a resolved library which can be an assembly, project, or package.
/// 
/// This is derived from a [`LibraryDescription`](super::LibraryDescription) and never changes
/// except through its property bag.
#[derive(Debug, Clone)]
pub struct Library {
	name: String,
	version: String,
	path: String,
	library_type: String,
	dependencies: Vec<String>,
	assemblies: Vec<AssemblyName>,
	properties: super::PropertyBag,
}

impl Library {
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		path: impl Into<String>,
		library_type: impl Into<String>,
		dependencies: Vec<String>,
		assemblies: Vec<AssemblyName>,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			path: path.into(),
			library_type: library_type.into(),
			dependencies,
			assemblies,
			properties: Default::default(),
		}
	}

	pub fn with_properties(mut self, properties: super::PropertyBag) -> Self {
		self.properties = properties;
		self
	}

	pub fn name(&self) -> &str { &self.name }
	/// Empty for unresolved libraries.
	pub fn version(&self) -> &str { &self.version }
	/// For projects this is the path to the project file.
	pub fn path(&self) -> &str { &self.path }
	/// Common values include `Project`, `Package` and `ReferenceAssembly`.
	pub fn library_type(&self) -> &str { &self.library_type }
	/// Names of other libraries.
	pub fn dependencies(&self) -> &[String] { &self.dependencies }
	/// Packages can contain multiple assemblies.
	pub fn assemblies(&self) -> &[AssemblyName] { &self.assemblies }

	pub fn properties(&self) -> &super::PropertyBag { &self.properties }
	pub fn properties_mut(&mut self) -> &mut super::PropertyBag { &mut self.properties }

	/// The value for `key`, or `None` when it is absent.
	pub fn get_property<T: std::any::Any + Send + Sync>(&self, key: super::LibraryPropertyName<T>) -> Option<&T> {
		self.properties.get(key)
	}
}
