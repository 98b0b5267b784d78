use std::collections::HashSet;

use apiproxy_core::SelectStrategy;

/// Orders candidate endpoints for one failover pass, each distinct URL once.
///
/// Round-robin keeps first-seen order; random shuffles the distinct set.
pub fn select_endpoints(urls: &[String], strategy: SelectStrategy) -> Vec<String> {
    match strategy {
        SelectStrategy::RoundRobin => {
            let mut seen = HashSet::with_capacity(urls.len());
            urls.iter()
                .filter(|u| seen.insert(u.as_str()))
                .cloned()
                .collect()
        }
        SelectStrategy::Random => {
            let mut out = urls.to_vec();
            out.sort();
            out.dedup();
            fastrand::shuffle(&mut out);
            out
        }
    }
}
