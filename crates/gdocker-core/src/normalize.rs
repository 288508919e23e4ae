//! CamelCase to snake_case key normalization for Docker API responses.
//!
//! Docker Engine answers with PascalCase keys (`NetworkSettings`,
//! `IPAddress`, `EndpointID`). Facts are reported with snake_case keys, so
//! every decoded response goes through [`normalize_tree`] before it leaves
//! the collector.
//!
//! ## Tokenization
//!
//! A key is cut into tokens of the shape `[A-Z]+[a-z0-9]*`. A run of three or
//! more capitals directly followed by a lowercase letter gives up its last
//! capital to the next token, so acronyms stay whole. Shorter runs are kept
//! as they are, which leaves Docker's `IPv4`/`IPv6` words intact:
//!
//! | Key           | Tokens              | Result          |
//! |---------------|---------------------|-----------------|
//! | `IPAddress`   | `IP`, `Address`     | `ip_address`    |
//! | `EndpointID`  | `Endpoint`, `ID`    | `endpoint_id`   |
//! | `HTTPSProxy`  | `HTTPS`, `Proxy`    | `https_proxy`   |
//! | `IPv4Address` | `IPv4`, `Address`   | `ipv4_address`  |
//! | `EnableIPv6`  | `Enable`, `IPv6`    | `enable_ipv6`   |
//!
//! Text that does not start a token (a lowercase prefix, dots, dashes) is
//! kept as a fragment of its own, which leaves option keys such as
//! `com.docker.network.bridge.name` untouched.

use crate::error::NormalizeError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Rewrites a CamelCase or PascalCase key as snake_case.
///
/// An empty key yields an empty string.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut fragments: Vec<String> = Vec::new();
    let mut gap = String::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            gap.push(chars[i]);
            i += 1;
            continue;
        }

        if !gap.is_empty() {
            fragments.push(std::mem::take(&mut gap));
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_uppercase() {
            i += 1;
        }
        // `IPAddress`: the `A` belongs to `Address`, not to `IP`. `IPv4` stays whole.
        if i - start > 2 && i < chars.len() && chars[i].is_ascii_lowercase() {
            i -= 1;
        }
        while i < chars.len() && (chars[i].is_ascii_lowercase() || chars[i].is_ascii_digit()) {
            i += 1;
        }

        fragments.push(chars[start..i].iter().collect());
    }

    if !gap.is_empty() {
        fragments.push(gap);
    }

    fragments.join("_").to_lowercase()
}

/// Normalizes every mapping key in a decoded JSON tree.
///
/// Mappings are rewritten recursively. A sequence is only entered when its
/// first element is a mapping, and then only its mapping elements are
/// rewritten. Scalars and all other sequences come back unchanged.
///
/// When two keys normalize to the same text the later one wins; the entry
/// keeps the position of the first.
#[must_use]
pub fn normalize_tree(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) if starts_with_mapping(&items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(normalize_map(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Serializes `value` into a JSON tree and normalizes it.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidNodeKind`] if `value` has no JSON
/// representation, e.g. a map keyed by tuples.
pub fn normalize_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, NormalizeError> {
    let tree =
        serde_json::to_value(value).map_err(|e| NormalizeError::InvalidNodeKind(e.to_string()))?;
    Ok(normalize_tree(tree))
}

fn normalize_map(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        out.insert(normalize_key(&key), normalize_tree(value));
    }
    out
}

fn starts_with_mapping(items: &[Value]) -> bool {
    items.first().is_some_and(Value::is_object)
}

/// Key normalizer with an optional nesting limit.
///
/// [`normalize_tree`] recurses as deep as the input goes. Long-running
/// callers that decode untrusted responses can bound that with
/// [`Normalizer::with_max_depth`]. Depth counts the mappings and sequences
/// the walk actually enters; a top-level mapping is depth 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    max_depth: Option<usize>,
}

impl Normalizer {
    /// Creates a normalizer without a depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_depth: None }
    }

    /// Creates a normalizer that rejects trees nested deeper than `limit`.
    #[must_use]
    pub const fn with_max_depth(limit: usize) -> Self {
        Self {
            max_depth: Some(limit),
        }
    }

    /// Returns the configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Normalizes `value` like [`normalize_tree`].
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::DepthExceeded`] if the tree is nested deeper
    /// than the configured limit.
    pub fn normalize(&self, value: Value) -> Result<Value, NormalizeError> {
        self.walk(value, 0)
    }

    fn walk(&self, value: Value, depth: usize) -> Result<Value, NormalizeError> {
        match value {
            Value::Object(map) => self.walk_map(map, depth + 1).map(Value::Object),
            Value::Array(items) if starts_with_mapping(&items) => {
                self.check(depth + 1)?;
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => self.walk_map(map, depth + 2).map(Value::Object),
                        other => Ok(other),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            other => Ok(other),
        }
    }

    fn walk_map(
        &self,
        map: Map<String, Value>,
        depth: usize,
    ) -> Result<Map<String, Value>, NormalizeError> {
        self.check(depth)?;
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let value = self.walk(value, depth)?;
            out.insert(normalize_key(&key), value);
        }
        Ok(out)
    }

    fn check(&self, depth: usize) -> Result<(), NormalizeError> {
        match self.max_depth {
            Some(limit) if depth > limit => Err(NormalizeError::DepthExceeded { limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_normalize_key_docker_keys() {
        assert_eq!(normalize_key("Id"), "id");
        assert_eq!(normalize_key("Version"), "version");
        assert_eq!(normalize_key("IPAddress"), "ip_address");
        assert_eq!(normalize_key("EndpointID"), "endpoint_id");
        assert_eq!(normalize_key("NetworkSettings"), "network_settings");
        assert_eq!(normalize_key("EnableIPv6"), "enable_ipv6");
        assert_eq!(normalize_key("IPAM"), "ipam");
        assert_eq!(normalize_key("MacAddress"), "mac_address");
    }

    #[test]
    fn test_normalize_key_lowercase_passthrough() {
        assert_eq!(normalize_key("id"), "id");
        assert_eq!(normalize_key("ip_address"), "ip_address");
        assert_eq!(
            normalize_key("com.docker.network.bridge.name"),
            "com.docker.network.bridge.name"
        );
    }

    #[test]
    fn test_normalize_key_acronyms() {
        assert_eq!(normalize_key("HTTPSProxy"), "https_proxy");
        assert_eq!(normalize_key("ID"), "id");
        assert_eq!(normalize_key("IPv4"), "ipv4");
        assert_eq!(normalize_key("IPPrefixLen"), "ip_prefix_len");
        assert_eq!(normalize_key("NoProxyURL"), "no_proxy_url");
    }

    #[test]
    fn test_normalize_key_docker_ip_family() {
        let cases = [
            ("EnableIPv6", "enable_ipv6"),
            ("IPv4Address", "ipv4_address"),
            ("IPv6Address", "ipv6_address"),
            ("GlobalIPv6Address", "global_ipv6_address"),
            ("GlobalIPv6PrefixLen", "global_ipv6_prefix_len"),
            ("IPv6Gateway", "ipv6_gateway"),
            ("IPPrefixLen", "ip_prefix_len"),
            ("IPAddress", "ip_address"),
            ("IPAMConfig", "ipam_config"),
            ("LinkLocalIPs", "link_local_ips"),
        ];
        for (key, expected) in cases {
            assert_eq!(normalize_key(key), expected, "key {key}");
        }
    }

    #[test]
    fn test_normalize_key_digits() {
        assert_eq!(normalize_key("Ipv4Address"), "ipv4_address");
        assert_eq!(normalize_key("Api2Version"), "api2_version");
        assert_eq!(normalize_key("A1B2"), "a1_b2");
    }

    #[test]
    fn test_normalize_key_leading_lowercase_and_punctuation() {
        assert_eq!(normalize_key("camelCase"), "camel_case");
        assert_eq!(normalize_key("com.docker.Name"), "com.docker._name");
        assert_eq!(normalize_key("Foo-Bar"), "foo_-_bar");
    }

    #[test]
    fn test_normalize_key_empty() {
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_scalars_unchanged() {
        for scalar in [json!(null), json!(true), json!(42), json!(1.5), json!("CamelCase")] {
            assert_eq!(normalize_tree(scalar.clone()), scalar);
        }
    }

    #[test]
    fn test_nested_mapping() {
        let input = json!({"Id": "abc", "NetworkSettings": {"IPAddress": "10.0.0.1"}});
        let expected = json!({"id": "abc", "network_settings": {"ip_address": "10.0.0.1"}});
        assert_eq!(normalize_tree(input), expected);
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(normalize_tree(json!({})), json!({}));
    }

    #[test]
    fn test_sequence_of_mappings() {
        let input = json!([{"A": 1}, {"B": 2}]);
        assert_eq!(normalize_tree(input), json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_sequence_of_scalars_unchanged() {
        assert_eq!(normalize_tree(json!([1, 2, 3])), json!([1, 2, 3]));
        assert_eq!(normalize_tree(json!([])), json!([]));
    }

    #[test]
    fn test_sequence_not_starting_with_mapping_is_not_entered() {
        let input = json!({"Items": [1, {"InnerKey": 2}]});
        assert_eq!(normalize_tree(input), json!({"items": [1, {"InnerKey": 2}]}));
    }

    #[test]
    fn test_non_mapping_elements_in_mapping_sequence_untouched() {
        let input = json!([{"Key": 1}, "Text", [{"Nested": 2}]]);
        assert_eq!(
            normalize_tree(input),
            json!([{"key": 1}, "Text", [{"Nested": 2}]])
        );
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let input = json!({"Driver": "BridgeDriver", "Labels": {"com.example.Owner": "TeamA"}});
        let expected = json!({"driver": "BridgeDriver", "labels": {"com.example._owner": "TeamA"}});
        assert_eq!(normalize_tree(input), expected);
    }

    #[test]
    fn test_key_order_preserved() {
        let input = json!({"Zeta": 1, "Alpha": 2, "Mid": 3});
        let out = normalize_tree(input);
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let input = json!({"ID": 1, "Name": "x", "Id": 2});
        let out = normalize_tree(input);
        let map = out.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["id"], json!(2));
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["id", "name"]);
    }

    #[test]
    fn test_cardinality_preserved_without_collisions() {
        let input = json!({"Name": "bridge", "Id": "1", "Scope": "local", "Driver": "bridge"});
        let out = normalize_tree(input);
        assert_eq!(out.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_normalize_serialize() {
        let mut labels = BTreeMap::new();
        labels.insert("OwnerName", "ops");
        assert_eq!(
            normalize_serialize(&labels).unwrap(),
            json!({"owner_name": "ops"})
        );
    }

    #[test]
    fn test_normalize_serialize_invalid_node_kind() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);
        let err = normalize_serialize(&map).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidNodeKind(_)));
    }

    #[test]
    fn test_normalizer_without_limit_matches_normalize_tree() {
        let input = json!({"Containers": {"Abc": {"IPv4Address": "172.17.0.2/16"}}});
        assert_eq!(
            Normalizer::new().normalize(input.clone()).unwrap(),
            normalize_tree(input)
        );
    }

    #[test]
    fn test_normalizer_depth_limit() {
        let input = json!({"A": {"B": {"C": 1}}});
        assert!(Normalizer::with_max_depth(3).normalize(input.clone()).is_ok());

        let err = Normalizer::with_max_depth(2).normalize(input).unwrap_err();
        assert!(matches!(err, NormalizeError::DepthExceeded { limit: 2 }));
    }

    #[test]
    fn test_normalizer_depth_counts_sequences() {
        let input = json!({"Config": [{"Subnet": "10.0.0.0/8"}]});
        assert!(Normalizer::with_max_depth(3).normalize(input.clone()).is_ok());
        assert!(Normalizer::with_max_depth(2).normalize(input).is_err());
    }

    #[test]
    fn test_normalizer_scalar_at_zero_depth() {
        assert_eq!(
            Normalizer::with_max_depth(0).normalize(json!("x")).unwrap(),
            json!("x")
        );
        assert!(Normalizer::with_max_depth(0).normalize(json!({})).is_err());
    }
}
