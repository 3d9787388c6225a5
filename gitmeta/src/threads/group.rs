use std::collections::BTreeMap;

/// Groups `items` under the string form of their key.
///
/// Items keep their input order within each group. Items for which
/// `key_fn` returns `None` are left out.
///
/// # Examples
///
/// ```
/// use gitmeta::threads::group_by;
///
/// let groups = group_by(vec![1, 2, 3, 4, 5], |n| (*n != 5).then(|| n % 2));
/// assert_eq!(groups["1"], vec![1, 3]);
/// assert_eq!(groups["0"], vec![2, 4]);
/// ```
pub fn group_by<I, T, K, F>(items: I, mut key_fn: F) -> BTreeMap<String, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: ToString,
    F: FnMut(&T) -> Option<K>,
{
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        if let Some(key) = key_fn(&item) {
            groups.entry(key.to_string()).or_default().push(item);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_drops_unkeyed() {
        let items = vec![("a", Some(2)), ("b", None), ("c", Some(1)), ("d", Some(2))];

        let groups = group_by(items, |(_, key)| *key);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["2"], vec![("a", Some(2)), ("d", Some(2))]);
        assert_eq!(groups["1"], vec![("c", Some(1))]);
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let groups = group_by(Vec::<u8>::new(), |n| Some(*n));
        assert!(groups.is_empty());
    }
}
