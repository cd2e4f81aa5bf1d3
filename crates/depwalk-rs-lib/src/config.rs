use std::path::{Path, PathBuf};

/// Machine level locations used when building the providers for a walk.
#[derive(Debug, Clone)]
pub struct Config {
	packages_dir: PathBuf,
	reference_assemblies_dir: PathBuf,
	gac_dirs: Vec<PathBuf>,
	restore_command: String,
}

fn home_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	let home = std::env::var("USERPROFILE");

	#[cfg(not(target_os = "windows"))]
	let home = std::env::var("HOME");

	/* Without a home directory everything ends up relative to the working directory */
	home.map(PathBuf::from).unwrap_or_default()
}

impl Default for Config {
	fn default() -> Self {
		Self {
			packages_dir: {
				if let Ok(e) = std::env::var("DEPWALK_PACKAGES") {
					PathBuf::from(e)
				} else {
					home_dir().join(".depwalk").join("packages")
				}
			},
			reference_assemblies_dir: {
				if let Ok(e) = std::env::var("DEPWALK_REFERENCE_ASSEMBLIES") {
					PathBuf::from(e)
				} else {
					home_dir().join(".depwalk").join("reference-assemblies")
				}
			},
			gac_dirs: {
				if let Some(e) = std::env::var_os("DEPWALK_GAC") {
					std::env::split_paths(&e).collect()
				} else {
					Vec::new()
				}
			},
			restore_command: "depwalk restore".to_string(),
		}
	}
}

impl Config {
	pub fn packages_dir(&self) -> &Path {
		&self.packages_dir
	}
	/// Unlike the other directories this does not have to exist yet, a restore creates it.
	pub fn set_packages_dir(&mut self, packages_dir: PathBuf) {
		self.packages_dir = packages_dir;
	}

	pub fn reference_assemblies_dir(&self) -> &Path {
		&self.reference_assemblies_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_reference_assemblies_dir(&mut self, reference_assemblies_dir: PathBuf) -> bool {
		if reference_assemblies_dir.is_dir() {
			self.reference_assemblies_dir = reference_assemblies_dir;
			true
		} else {
			false
		}
	}

	pub fn gac_dirs(&self) -> &[PathBuf] {
		&self.gac_dirs
	}
	/// Directories that don't exist are dropped, returns how many were kept.
	pub fn set_gac_dirs(&mut self, gac_dirs: impl IntoIterator<Item = PathBuf>) -> usize {
		self.gac_dirs = gac_dirs.into_iter().filter(|d| d.is_dir()).collect();
		self.gac_dirs.len()
	}

	/// The command users are told to run when the lock file can't be used.
	pub fn restore_command(&self) -> &str {
		&self.restore_command
	}
	pub fn set_restore_command(&mut self, restore_command: impl Into<String>) {
		self.restore_command = restore_command.into();
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn setting_missing_directory_is_rejected() {
		let mut config = Config::default();
		let before = config.reference_assemblies_dir().to_path_buf();
		assert!(!config.set_reference_assemblies_dir(PathBuf::from("/this/path/should/not/exist")));
		assert_eq!(config.reference_assemblies_dir(), before);
	}

	#[test]
	fn missing_gac_dirs_are_dropped() {
		let mut config = Config::default();
		let kept = config.set_gac_dirs(vec![std::env::temp_dir(), PathBuf::from("/this/path/should/not/exist")]);
		assert_eq!(kept, 1);
	}
}
