use rustc_hash::FxHashSet;

use crate::{Progress, Tournament};

/// Something that names a tournament.
pub trait Identity {
    fn identity(&self) -> &str;
}

impl Identity for Tournament {
    fn identity(&self) -> &str {
        &self.name
    }
}

/// Fresh entries that still need processing: those whose identity is not
/// persisted yet, without repeats.
pub fn pending<D, T>(fresh: Vec<D>, persisted: &[T]) -> Vec<D>
where
    D: Identity,
    T: Identity,
{
    let mut seen: FxHashSet<String> = persisted
        .iter()
        .map(|t| t.identity().to_owned())
        .collect();

    fresh
        .into_iter()
        .filter(|d| seen.insert(d.identity().to_owned()))
        .collect()
}

/// Processes the pending part of `fresh` with `fetch`, in order, and puts
/// the results in front of `persisted`.
///
/// A tournament that is already persisted is never fetched again. The first
/// failing fetch aborts the merge.
pub fn merge_tournaments<D, T, E, P, F>(
    fresh: Vec<D>,
    persisted: Vec<T>,
    progress: &mut P,
    mut fetch: F,
) -> Result<Vec<T>, E>
where
    D: Identity,
    T: Identity,
    P: Progress,
    F: FnMut(D) -> Result<T, E>,
{
    let pending = pending(fresh, &persisted);
    let total = pending.len();

    let mut merged = Vec::with_capacity(total + persisted.len());
    for (i, descriptor) in pending.into_iter().enumerate() {
        progress.tournament(i + 1, total, descriptor.identity());
        merged.push(fetch(descriptor)?);
    }

    merged.extend(persisted);
    Ok(merged)
}
