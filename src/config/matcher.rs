//! Request path matcher for routes the redirect filter must skip.

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::EdgeConfig;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches request paths against `edge.excludePatterns`.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    exclude_set: GlobSet,
}

impl PathMatcher {
    /// Creates a new matcher from the edge settings.
    pub fn new(config: &EdgeConfig) -> Result<Self, MatcherError> {
        let exclude_set = Self::build_glob_set(&config.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { exclude_set })
    }

    /// A matcher that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self { exclude_set: GlobSet::empty() }
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if the request path matches any exclude pattern.
    ///
    /// The query string must already be stripped.
    #[must_use]
    pub fn is_excluded(&self, request_path: &str) -> bool {
        self.exclude_set.is_match(request_path)
    }
}
