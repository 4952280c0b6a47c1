//! Attribute maps for nodes.

use std::collections::BTreeMap;

/// Attribute map for a node: key -> string value.
///
/// Ordered so that rendering and codec output are deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Helper macro to create attribute maps.
#[macro_export]
macro_rules! attrs {
    () => {
        std::collections::BTreeMap::<String, String>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = std::collections::BTreeMap::<String, String>::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
