use std::collections::BTreeMap;

use gpui::SharedString;

use super::state::{FormError, FormResult};

/// Current control values of a group, keyed by control id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormValues<T> {
    values: BTreeMap<SharedString, T>,
}

impl<T> FormValues<T> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.values.get(id)
    }

    pub fn require(&self, id: &str) -> FormResult<&T> {
        self.values
            .get(id)
            .ok_or_else(|| FormError::MissingControl(SharedString::from(id.to_owned())))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SharedString, &T)> {
        self.values.iter()
    }
}

impl<T> Default for FormValues<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> FromIterator<(K, T)> for FormValues<T>
where
    K: Into<SharedString>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(id, value)| (id.into(), value))
                .collect(),
        }
    }
}

/// Typed view over a submitted group, usually derived with
/// `#[derive(FormData)]`.
pub trait FormData<T>: Sized {
    fn from_values(values: &FormValues<T>) -> FormResult<Self>;
}
