use crate::key::Key;
use crate::keyspace::{brute_force, SearchOutcome};
use std::time::Duration;

/// Run a brute-force search for `key`, bounded by an optional time budget
/// in seconds, and build a report of the outcome.
pub fn run_brute_force(key: &Key, time_limit_secs: Option<u64>) -> String {
    let limit = time_limit_secs.map(Duration::from_secs);
    let outcome = brute_force(key, limit);
    report(&outcome)
}

fn report(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    out.push_str("Brute force over the lexicographic keyspace\n");
    out.push_str(&format!("Keys tried: {}\n", outcome.attempts));
    out.push_str(&format!(
        "Time elapsed: {:.3} seconds\n",
        outcome.elapsed.as_secs_f64()
    ));
    out.push_str(&format!(
        "Key found: {}\n",
        if outcome.found { "yes" } else { "no (budget elapsed)" }
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::key_charmap;

    #[test]
    fn test_brute_force_report_for_the_smallest_key() {
        let ascending: String = key_charmap().into_iter().collect();
        let key = Key::new(ascending).unwrap();
        let report = run_brute_force(&key, Some(5));
        assert!(report.contains("Keys tried: 1"));
        assert!(report.contains("Key found: yes"));
    }

    #[test]
    fn test_brute_force_report_when_the_budget_elapses() {
        let descending: String = key_charmap().into_iter().rev().collect();
        let key = Key::new(descending).unwrap();
        let report = run_brute_force(&key, Some(0));
        assert!(report.contains("Key found: no"));
    }
}
