use std::{cmp::Ordering, fmt::Debug};

/// A total ordering over payload values, used to sort and de-duplicate a
/// [`PayloadSet`].
///
/// Non-capturing closures coerce to this type.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// An ordered set of payload values.
///
/// Values are kept sorted under the set's [`Comparator`], and two values are
/// considered duplicates when the comparator reports them [`Ordering::Equal`].
/// Inserting a duplicate keeps the value already present.
#[derive(Clone)]
pub struct PayloadSet<T> {
    items: Vec<T>,
    cmp: Comparator<T>,
}

impl<T> PayloadSet<T>
where
    T: Ord,
{
    /// Construct an empty set using the natural [`Ord`] ordering of `T`.
    pub fn new() -> Self {
        Self::new_by(T::cmp)
    }
}

impl<T> Default for PayloadSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PayloadSet<T> {
    /// Construct an empty set ordered by `cmp`.
    pub fn new_by(cmp: Comparator<T>) -> Self {
        Self { items: vec![], cmp }
    }

    /// Insert `value`, returning true if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        let cmp = self.cmp;
        match self.items.binary_search_by(|v| cmp(v, &value)) {
            Ok(_) => false,
            Err(idx) => {
                self.items.insert(idx, value);
                true
            }
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        let cmp = self.cmp;
        self.items.binary_search_by(|v| cmp(v, value)).is_ok()
    }

    /// Construct a set from `values` ordered by `cmp`, dropping all but the
    /// first of any values the comparator considers equal.
    pub fn from_vec_by(mut values: Vec<T>, cmp: Comparator<T>) -> Self {
        sort_dedup(&mut values, cmp);
        Self { items: values, cmp }
    }

    /// Merge all values of `other` into `self`.
    ///
    /// The result is ordered by the comparator of `self`. Values of `other`
    /// that duplicate an existing value are dropped.
    pub fn union(&mut self, other: Self) {
        if other.items.is_empty() {
            return;
        }

        self.items.extend(other.items);
        sort_dedup(&mut self.items, self.cmp);
    }

    /// Return an independent copy of this set, materialised under `cmp`.
    pub fn reordered_by(&self, cmp: Comparator<T>) -> Self
    where
        T: Clone,
    {
        Self::from_vec_by(self.items.clone(), cmp)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the values in comparator order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// The ordering this set is materialised under.
    pub fn comparator(&self) -> Comparator<T> {
        self.cmp
    }
}

/// Sort `items` by `cmp` and remove the later of each pair of equal values.
fn sort_dedup<T>(items: &mut Vec<T>, cmp: Comparator<T>) {
    // A stable sort places earlier values ahead of their later duplicates, so
    // dedup keeps the earliest.
    items.sort_by(cmp);
    items.dedup_by(|later, earlier| cmp(earlier, later) == Ordering::Equal);
}

impl<T> PartialEq for PayloadSet<T> {
    /// Set equality: both sets hold the same number of values, and every value
    /// of `self` is a member of `other`.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl<T> Debug for PayloadSet<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T> FromIterator<T> for PayloadSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items = iter.into_iter().collect::<Vec<_>>();
        items.sort();
        items.dedup();
        Self { items, cmp: T::cmp }
    }
}

impl<T> IntoIterator for PayloadSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PayloadSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for PayloadSet<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PayloadSet<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The comparator cannot be serialised; the natural ordering is used.
        <Vec<T> as serde::Deserialize>::deserialize(deserializer)
            .map(|v| v.into_iter().collect())
    }
}
