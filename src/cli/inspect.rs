use crate::key::Key;
use crate::keyspace::{approx_location, keyspace_size};
use num_traits::ToPrimitive;

/// Build a human-readable report about a key's place in the keyspace.
pub fn run_inspect(key: &Key) -> String {
    let location = approx_location(key) * 100.0;
    let space = keyspace_size();

    let mut out = String::new();
    out.push_str(&format!("Key: {}\n", key));
    out.push_str(&format!("Base-94 value: {}\n", key.to_integer()));
    out.push_str(&format!(
        "Integer distance from the smallest key: {:.6}% (approximate, not a permutation rank)\n",
        location
    ));
    out.push_str(&format!(
        "Keyspace size: 94! (~{:.10e})\n",
        space.to_f64().unwrap_or(f64::MAX)
    ));
    out
}
