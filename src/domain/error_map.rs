use std::collections::BTreeMap;
use std::fmt::Debug;

/// A named, editable field of an entity.
pub trait EntityField: Copy + Ord + Debug {
    /// Wire name of the field, as used in request payloads.
    fn key(&self) -> &'static str;

    /// Human-readable name shown next to validation messages.
    fn label(&self) -> &'static str;
}

/// Field → message map produced by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap<F: Ord>(BTreeMap<F, String>);

impl<F: EntityField> ErrorMap<F> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn single(field: F, message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(field, message);
        map
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: F) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

}

impl<F: EntityField> Default for ErrorMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: EntityField> FromIterator<(F, String)> for ErrorMap<F> {
    fn from_iter<I: IntoIterator<Item = (F, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Applies a field-level validation outcome to an entity's optional error map.
///
/// A clean outcome drops the field's entry, and the whole map once it is empty,
/// so a cleanly validated entity carries `None`.
pub fn apply_field_outcome<F: EntityField>(
    errors: &mut Option<ErrorMap<F>>,
    field: F,
    outcome: Result<(), String>,
) {
    match outcome {
        Ok(()) => {
            if let Some(map) = errors.as_mut() {
                map.remove(field);
                if map.is_empty() {
                    *errors = None;
                }
            }
        }
        Err(message) => errors.get_or_insert_with(ErrorMap::new).insert(field, message),
    }
}
