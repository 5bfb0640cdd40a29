use crate::Value;

/// Flattens nested containers into dotted keys.
///
/// Every scalar leaf is emitted as `(prefix + path, leaf)` in the container's
/// own order. Sequence elements use their index as the path segment. An empty
/// container contributes nothing; a scalar input is returned under `prefix`
/// with its trailing `.` removed.
pub fn flatten(input: &Value, prefix: &str) -> Vec<(String, Value)> {
    let mut output = Vec::new();
    match input.entries() {
        Some(entries) => flatten_into(entries, prefix, &mut output),
        None => output.push((prefix.trim_end_matches('.').to_string(), input.clone())),
    }
    output
}

fn flatten_into(entries: Vec<(String, &Value)>, prefix: &str, output: &mut Vec<(String, Value)>) {
    for (key, value) in entries {
        match value.entries() {
            Some(children) => flatten_into(children, &format!("{prefix}{key}."), output),
            None => output.push((format!("{prefix}{key}"), value.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(String, Value)]) -> Vec<&str> {
        pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_nested_mapping() {
        let input = Value::mapping([
            ("db", Value::mapping([("host", Value::from("x")), ("port", Value::from(5432))])),
            ("debug", Value::from(true)),
        ]);

        let flat = flatten(&input, "");

        assert_eq!(keys(&flat), ["db.host", "db.port", "debug"]);
        assert_eq!(flat[1].1, Value::Integer(5432));
    }

    #[test]
    fn test_prefix_and_sequences() {
        let input = Value::mapping([("hosts", Value::from(vec!["a", "b"]))]);

        let flat = flatten(&input, "app.");

        assert_eq!(keys(&flat), ["app.hosts.0", "app.hosts.1"]);
    }

    #[test]
    fn test_empty_container_contributes_nothing() {
        let input = Value::mapping([("empty", Value::Mapping(Vec::new()))]);
        assert!(flatten(&input, "").is_empty());
    }

    #[test]
    fn test_scalar_input() {
        let flat = flatten(&Value::from(1), "a.b.");
        assert_eq!(flat, [("a.b".to_string(), Value::Integer(1))]);
    }
}
