use std::cmp::Ordering;

use crate::models::PackageManifest;

/// Sort manifests by name and drop the ones the resolver did not keep.
///
/// The sort is stable: unnamed manifests go last and keep their relative order.
/// Manifests with no reference, or with an ignored one, are filtered out.
pub fn collect(mut manifests: Vec<PackageManifest>) -> Vec<PackageManifest> {
    manifests.sort_by(|a, b| compare_names(a.name.as_deref(), b.name.as_deref()));

    manifests
        .into_iter()
        .filter(|m| m.reference.as_ref().is_some_and(|r| !r.ignore))
        .collect()
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => locale_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-sensitive locale comparison.
///
/// Letters compare case-insensitively first (`a < B < c`). On a tie, the first
/// position where the case differs decides, lowercase before uppercase
/// (`a < A`). Anything still equal falls back to code-point order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a
        .cmp(folded_b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
