use indexmap::IndexMap;
use std::hash::Hash;

/// Shallow-merges three mappings into a new one.
///
/// Precedence is `given > explicit > implicit`: for a key present in several inputs the value
/// of the later argument wins, keys present in only one input are kept. Key order is the order
/// of first appearance across `implicit`, `explicit`, `given`.
pub fn merge_data<K, V>(
    implicit: &IndexMap<K, V>,
    explicit: &IndexMap<K, V>,
    given: &IndexMap<K, V>,
) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    let mut merged = IndexMap::with_capacity(implicit.len() + explicit.len() + given.len());

    for layer in [implicit, explicit, given] {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&'static str, i32)]) -> IndexMap<&'static str, i32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_later_layers_win() {
        let merged = merge_data(
            &map(&[("a", 1), ("b", 1)]),
            &map(&[("b", 2), ("c", 2)]),
            &map(&[("c", 3)]),
        );

        assert_eq!(merged, map(&[("a", 1), ("b", 2), ("c", 3)]));
    }

    #[test]
    fn test_given_overrides_implicit_directly() {
        let merged = merge_data(&map(&[("a", 1)]), &map(&[]), &map(&[("a", 9)]));

        assert_eq!(merged["a"], 9);
    }

    #[test]
    fn test_key_order_follows_first_appearance() {
        let merged = merge_data(
            &map(&[("z", 1)]),
            &map(&[("a", 2), ("z", 2)]),
            &map(&[("m", 3)]),
        );

        assert_eq!(merged.keys().copied().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_all_empty() {
        let empty: IndexMap<String, String> = IndexMap::new();

        assert!(merge_data(&empty, &empty, &empty).is_empty());
    }
}
