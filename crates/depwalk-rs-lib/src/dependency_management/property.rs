//! An open ended set of values attached to a library, keyed by name.
//! 
//! Keys carry the type of their value so reads don't need a cast. A missing key, or a key
//! stored under the same name with a different type, reads as absent.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// A named slot in a [`PropertyBag`] holding a `T`.
pub struct LibraryPropertyName<T> {
	name: &'static str,
	value_type: PhantomData<fn() -> T>,
}

impl<T> LibraryPropertyName<T> {
	pub const fn new(name: &'static str) -> Self {
		Self { name, value_type: PhantomData }
	}

	pub fn name(&self) -> &'static str { self.name }
}

impl<T> Clone for LibraryPropertyName<T> {
	fn clone(&self) -> Self { *self }
}

impl<T> Copy for LibraryPropertyName<T> {}

impl<T> std::fmt::Debug for LibraryPropertyName<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "LibraryPropertyName({})", self.name)
	}
}

/// Values are shared, cloning a bag or projecting a library does not copy them.
#[derive(Clone, Default)]
pub struct PropertyBag {
	values: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl PropertyBag {
	/// Overwrites any existing value with the same name.
	pub fn set<T: Any + Send + Sync>(&mut self, key: LibraryPropertyName<T>, value: T) {
		self.values.insert(key.name, Arc::new(value));
	}

	pub fn get<T: Any + Send + Sync>(&self, key: LibraryPropertyName<T>) -> Option<&T> {
		self.values.get(key.name).and_then(|v| v.downcast_ref::<T>())
	}

	pub fn get_or_default<T: Any + Send + Sync + Clone + Default>(&self, key: LibraryPropertyName<T>) -> T {
		self.get(key).cloned().unwrap_or_default()
	}

	pub fn contains<T: Any + Send + Sync>(&self, key: LibraryPropertyName<T>) -> bool {
		self.get(key).is_some()
	}

	pub fn remove<T: Any + Send + Sync>(&mut self, key: LibraryPropertyName<T>) -> bool {
		self.values.remove(key.name).is_some()
	}

	pub fn len(&self) -> usize { self.values.len() }
	pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl std::fmt::Debug for PropertyBag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.values.keys()).finish()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	const COUNT: LibraryPropertyName<u32> = LibraryPropertyName::new("Count");
	const COUNT_AS_STRING: LibraryPropertyName<String> = LibraryPropertyName::new("Count");
	const LABEL: LibraryPropertyName<String> = LibraryPropertyName::new("Label");

	#[test]
	fn missing_reads_as_default() {
		let bag = PropertyBag::default();
		assert_eq!(bag.get(LABEL), None);
		assert_eq!(bag.get_or_default(LABEL), "");
		assert_eq!(bag.get_or_default(COUNT), 0);
	}

	#[test]
	fn set_overwrites() {
		let mut bag = PropertyBag::default();
		bag.set(COUNT, 1);
		bag.set(COUNT, 2);
		assert_eq!(bag.get(COUNT), Some(&2));
		assert_eq!(bag.len(), 1);
	}

	#[test]
	fn wrong_type_reads_as_missing() {
		let mut bag = PropertyBag::default();
		bag.set(COUNT, 1);
		assert_eq!(bag.get(COUNT_AS_STRING), None);
	}

	#[test]
	fn clones_share_values() {
		let mut bag = PropertyBag::default();
		bag.set(LABEL, "x".to_string());
		let copy = bag.clone();
		bag.set(LABEL, "y".to_string());
		assert_eq!(copy.get(LABEL).map(String::as_str), Some("x"));
		assert_eq!(bag.get(LABEL).map(String::as_str), Some("y"));
	}
}
