//! Best-effort selection with a degraded flag.
//!
//! Several lookups in the engine share the same fallback policy: prefer the
//! first element satisfying a predicate, otherwise degrade to the first
//! element rather than failing, and tell the caller which happened. This
//! module is the single implementation behind all of them, so every call
//! site surfaces fallback uniformly in provenance data.

/// A selected element plus whether the selection was a fallback.
#[derive(Debug, Clone, Copy)]
pub struct Selected<'a, T> {
    pub value: &'a T,
    /// True when no element satisfied the predicate and the first element
    /// was substituted.
    pub degraded: bool,
}

/// Select the first element matching `pred`, falling back to the first
/// element of the slice when nothing matches. Returns `None` only for an
/// empty slice.
pub fn first_matching<'a, T>(
    items: &'a [T],
    pred: impl Fn(&T) -> bool,
) -> Option<Selected<'a, T>> {
    if let Some(value) = items.iter().find(|item| pred(item)) {
        return Some(Selected {
            value,
            degraded: false,
        });
    }
    items.first().map(|value| Selected {
        value,
        degraded: true,
    })
}
