//! First-non-empty value resolution
//!
//! Documentation values come from several places: an override passed at
//! registration, a hint on the resource, something derived from the model and
//! a default. Candidates are always given highest priority first.

use std::collections::{BTreeMap, HashMap};

/// Values that can be "empty" and therefore skipped during resolution
pub trait Fallback {
    fn is_empty_value(&self) -> bool;
}

impl Fallback for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Fallback for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Fallback + ?Sized> Fallback for &T {
    fn is_empty_value(&self) -> bool {
        (*self).is_empty_value()
    }
}

impl<T: Fallback> Fallback for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.as_ref().is_none_or(Fallback::is_empty_value)
    }
}

impl<T> Fallback for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Fallback for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Fallback for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Every non-empty candidate, in the order given
pub fn all_values<T, I>(candidates: I) -> impl Iterator<Item = T>
where
    T: Fallback,
    I: IntoIterator<Item = Option<T>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty_value())
}

/// The first non-empty candidate, or `default` when none qualifies
pub fn first_value<T, I>(candidates: I, default: T) -> T
where
    T: Fallback,
    I: IntoIterator<Item = Option<T>>,
{
    all_values(candidates).next().unwrap_or(default)
}

/// Merge maps into `target`; candidates come highest priority first, so
/// they are applied in reverse and the first one wins on key collisions
pub fn merge_in_priority<K, V, I>(target: &mut BTreeMap<K, V>, candidates: I)
where
    K: Ord,
    I: IntoIterator<Item = Option<BTreeMap<K, V>>>,
{
    let sources: Vec<_> = all_values(candidates).collect();
    for source in sources.into_iter().rev() {
        target.extend(source);
    }
}
