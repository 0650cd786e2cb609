use std::cmp::Ordering;

/// Compare two dotted-numeric version strings.
///
/// A leading `v` is stripped, each dot-separated component is parsed as an
/// unsigned integer, the shorter sequence is zero-padded, and the components
/// are compared left to right. Returns `None` when either version has a
/// non-numeric component; callers treat incomparable versions as "no update".
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Option<Ordering> {
    let left = parse_components(left)?;
    let right = parse_components(right)?;

    for index in 0..left.len().max(right.len()) {
        let left_part = left.get(index).copied().unwrap_or(0);
        let right_part = right.get(index).copied().unwrap_or(0);
        match left_part.cmp(&right_part) {
            Ordering::Equal => {}
            decided => return Some(decided),
        }
    }

    Some(Ordering::Equal)
}

#[must_use]
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    matches!(compare_versions(latest, current), Some(Ordering::Greater))
}

fn parse_components(version: &str) -> Option<Vec<u64>> {
    let version = version.strip_prefix('v').unwrap_or(version);
    version
        .split('.')
        .map(|component| component.parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{compare_versions, is_newer_version};

    #[test]
    fn version_comparison_pads_missing_components_with_zero() {
        assert_eq!(compare_versions("1.2.0", "1.2"), Some(Ordering::Equal));
        assert_eq!(compare_versions("1.2.1", "1.2"), Some(Ordering::Greater));
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Some(Ordering::Equal));
        assert_eq!(compare_versions("2.0", "1.9.9"), Some(Ordering::Greater));
        assert_eq!(compare_versions("1.9.9", "2.0"), Some(Ordering::Less));
    }

    #[test]
    fn non_numeric_components_are_incomparable() {
        assert_eq!(compare_versions("1.2.x", "1.0.0"), None);
        assert_eq!(compare_versions("1.0.0", "1.0.0-beta"), None);
        assert!(!is_newer_version("1.2.x", "1.0.0"));
    }

    #[test]
    fn leading_v_prefix_is_ignored() {
        assert!(is_newer_version("v1.1.0", "1.0.0"));
        assert!(is_newer_version("1.1.0", "v1.0.0"));
        assert!(!is_newer_version("v1.0.0", "v1.0.0"));
    }

    #[test]
    fn newer_version_requires_strict_increase() {
        assert!(is_newer_version("1.0.1", "1.0.0"));
        assert!(is_newer_version("1.1", "1.0.9"));
        assert!(!is_newer_version("1.0.0", "1.0.0"));
        assert!(!is_newer_version("1.0.0", "1.0.1"));
        assert!(!is_newer_version("0.9.0", "1.0.0"));
    }
}
