use std::cmp::Ordering;
use std::fmt;

/// A dot-separated version such as `7.2` or `8.1.27`, ordered component-wise.
///
/// Components are non-negative integers; anything unparseable counts as `0`,
/// so construction never fails. Missing trailing components also count as
/// `0`, which makes `7.2` equal to `7.2.0` — equality goes through the same
/// comparator as ordering, not through the raw text.
#[derive(Debug, Clone)]
pub struct VersionString {
    raw: String,
}

impl VersionString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn components(&self) -> impl Iterator<Item = u64> + '_ {
        self.raw
            .split('.')
            .map(|part| part.trim().parse::<u64>().unwrap_or(0))
    }
}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> Ordering {
        let a: Vec<u64> = self.components().collect();
        let b: Vec<u64> = other.components().collect();
        compare_components(&a, &b)
    }
}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionString {}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for VersionString {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn compare_components(a: &[u64], b: &[u64]) -> Ordering {
    let max_len = a.len().max(b.len());
    for i in 0..max_len {
        let left = *a.get(i).unwrap_or(&0);
        let right = *b.get(i).unwrap_or(&0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
