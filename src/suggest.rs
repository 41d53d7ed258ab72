use anyhow::{Context, Result};
use itertools::Itertools;

// Bundled read-only reference list, never mutated
const MEDICATIONS_JSON: &str = include_str!("../assets/medications.json");

const MIN_QUERY_LEN: usize = 3;

pub fn reference_list() -> Result<Vec<String>> {
    serde_json::from_str(MEDICATIONS_JSON)
        .with_context(|| "Failed to de-serialise bundled medication name list")
}

/// Case-insensitive substring match over `names`, preserving their order.
/// Queries under three characters are too noisy and yield nothing.
pub fn filter(query: &str, names: &[String]) -> Vec<String> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_queries_yield_nothing() {
        let list = names(&["Paracetamol", "Ibuprofeno"]);
        assert!(filter("", &list).is_empty());
        assert!(filter("pa", &list).is_empty());
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let list = names(&["Paracetamol", "Ibuprofeno"]);
        assert_eq!(filter("par", &list), names(&["Paracetamol"]));
        assert_eq!(filter("PROF", &list), names(&["Ibuprofeno"]));
        assert_eq!(filter("xyz", &list), Vec::<String>::new());
    }

    #[test]
    fn reference_order_is_preserved() {
        let list = names(&["Omeprazol", "Enalapril", "Loratadina", "Paracetamol"]);
        assert_eq!(filter("ol", &list), names(&["Omeprazol", "Paracetamol"]));
    }

    #[test]
    fn bundled_list_parses_and_is_non_trivial() {
        let list = reference_list().unwrap();
        assert!(list.len() >= 10);
        assert!(list.contains(&"Paracetamol".to_string()));
    }
}
