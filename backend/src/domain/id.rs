//! Record ID generation.
//!
//! IDs have the form `<prefix>::<epoch_millis>`. When two records are created
//! in the same millisecond the timestamp is bumped until the ID is unique.

use std::collections::HashSet;

pub fn generate_id<'a, I>(prefix: &str, epoch_millis: u64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();

    let mut millis = epoch_millis;
    loop {
        let candidate = format!("{}::{}", prefix, millis);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        millis += 1;
    }
}
