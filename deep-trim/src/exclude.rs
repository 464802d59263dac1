use serde::{Deserialize, Serialize};

const WILDCARD_SUFFIX: &str = ".*";

/// Patterns naming string leaves that keep their original text.
///
/// Two forms are understood:
/// - exact path, e.g. `user.name` or `users[2].email`;
/// - prefix wildcard ending in `.*`, e.g. `user.*`, which covers everything
///   strictly below `user` but not `user` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcludeList {
    patterns: Vec<String>,
}

impl ExcludeList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pattern excludes `path`. Any single match is enough.
    pub fn matches(&self, path: &str) -> bool {
        should_exclude(path, &self.patterns)
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludeList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Exact match first, then `.*` prefix wildcards.
pub fn should_exclude<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    if patterns.iter().any(|p| p.as_ref() == path) {
        return true;
    }

    patterns.iter().any(|p| {
        p.as_ref()
            .strip_suffix(WILDCARD_SUFFIX)
            .map(|prefix| is_strictly_below(path, prefix))
            .unwrap_or(false)
    })
}

// `path` starts with `prefix` followed by a dot.
fn is_strictly_below(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .map(|rest| rest.starts_with('.'))
        .unwrap_or(false)
}
