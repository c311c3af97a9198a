//! Freshness resolution: which contexts are "current"

use std::cmp::Ordering;
use std::collections::HashSet;

use super::Context;
use crate::{Error, Result};

/// Pick the single most recent context and return its short name
///
/// Left-to-right reduction seeded with the first context. A higher
/// `lifespan_count` wins; a context without one never beats one that has it.
/// Equal counts are settled by the length of the *full* path: the candidate
/// replaces the accumulator unless the accumulator's full name is strictly
/// shorter, so equal lengths go to the later context.
///
/// The tie-break compares raw platform paths, session prefix included, so it
/// is only stable while the platform keeps one path layout per agent.
///
/// # Errors
///
/// Returns [`Error::NoActiveContexts`] if `contexts` is empty
pub fn most_recent_context(contexts: &[Context]) -> Result<&str> {
    let (first, rest) = contexts.split_first().ok_or(Error::NoActiveContexts)?;

    let winner = rest.iter().fold(first, |acc, candidate| {
        let Some(acc_count) = acc.lifespan_count else {
            return candidate;
        };
        let Some(candidate_count) = candidate.lifespan_count else {
            return acc;
        };

        match acc_count.cmp(&candidate_count) {
            Ordering::Greater => acc,
            Ordering::Less => candidate,
            Ordering::Equal if acc.name.len() < candidate.name.len() => acc,
            Ordering::Equal => candidate,
        }
    });

    Ok(winner.short_name())
}

/// Short names of every context sharing the highest `lifespan_count`
///
/// Contexts without a lifespan are ignored, so the set is empty when none
/// carries one.
#[must_use]
pub fn most_recent_contexts(contexts: &[Context]) -> HashSet<&str> {
    let mut max: Option<u32> = None;
    let mut names = HashSet::new();

    for context in contexts {
        let Some(count) = context.lifespan_count else {
            continue;
        };

        match max.map_or(Ordering::Greater, |m| count.cmp(&m)) {
            Ordering::Greater => {
                max = Some(count);
                names.clear();
                names.insert(context.short_name());
            }
            Ordering::Equal => {
                names.insert(context.short_name());
            }
            Ordering::Less => {}
        }
    }

    names
}
