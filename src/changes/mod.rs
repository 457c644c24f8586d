//! Pull request change collection.
//!
//! A [`ChangeSet`] summarises what the pull request touches: the changed
//! paths plus the textual `--stat` and `--shortstat` renderings of the diff
//! between the base reference and `HEAD`. It is assembled from three
//! independent [`DiffSource`] queries, all of which must succeed.

mod error;
mod git2_source;

pub use error::ChangeCollectionError;
pub use git2_source::Git2DiffSource;

/// Read-only diff queries against the base reference.
///
/// The trait enables dependency injection, allowing the estimate pipeline to
/// be tested without real repositories.
#[cfg_attr(test, mockall::automock)]
pub trait DiffSource {
    /// Full per-file stat text (the `git diff --stat` rendering).
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn stat_text(&self, base_ref: &str) -> Result<String, ChangeCollectionError>;

    /// One-line summary of files changed, insertions and deletions.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn shortstat_text(&self, base_ref: &str) -> Result<String, ChangeCollectionError>;

    /// Changed paths in diff order.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn changed_files(&self, base_ref: &str) -> Result<Vec<String>, ChangeCollectionError>;
}

/// Immutable summary of the changes under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    base_ref: String,
    head_ref: String,
    files: Vec<String>,
    stat_text: String,
    shortstat_text: String,
}

impl ChangeSet {
    /// Builds a change set, dropping repeated paths while keeping the first
    /// occurrence of each.
    #[must_use]
    pub fn new(
        base_ref: impl Into<String>,
        head_ref: impl Into<String>,
        files: Vec<String>,
        stat_text: impl Into<String>,
        shortstat_text: impl Into<String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(files.len());
        for file in files {
            if !unique.contains(&file) {
                unique.push(file);
            }
        }

        Self {
            base_ref: base_ref.into(),
            head_ref: head_ref.into(),
            files: unique,
            stat_text: stat_text.into(),
            shortstat_text: shortstat_text.into(),
        }
    }

    /// Base reference the diff was taken against.
    #[must_use]
    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }

    /// Label of the head side of the diff.
    #[must_use]
    pub fn head_ref(&self) -> &str {
        &self.head_ref
    }

    /// Changed paths, unique, in diff order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of changed paths.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Full stat text.
    #[must_use]
    pub fn stat_text(&self) -> &str {
        &self.stat_text
    }

    /// Short stat summary line.
    #[must_use]
    pub fn shortstat_text(&self) -> &str {
        &self.shortstat_text
    }
}

/// Runs the three diff queries and assembles a [`ChangeSet`].
///
/// # Errors
///
/// Returns the first [`ChangeCollectionError`] raised by any query; no
/// partial change set is produced.
pub fn collect_changes(
    source: &dyn DiffSource,
    base_ref: &str,
    head_ref: &str,
) -> Result<ChangeSet, ChangeCollectionError> {
    let stat_text = source.stat_text(base_ref)?;
    let shortstat_text = source.shortstat_text(base_ref)?;
    let files = source.changed_files(base_ref)?;

    tracing::debug!(
        base_ref,
        head_ref,
        files = files.len(),
        "collected pull request changes"
    );

    Ok(ChangeSet::new(
        base_ref,
        head_ref,
        files,
        stat_text,
        shortstat_text,
    ))
}
