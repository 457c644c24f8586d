//! Git2-based implementation of `DiffSource`.

use camino::Utf8Path;
use git2::{Commit, Diff, DiffStatsFormat, ErrorCode, Repository};

use super::DiffSource;
use super::error::ChangeCollectionError;

const STAT_WIDTH: usize = 80;

/// Diff queries served by libgit2.
///
/// The diff runs from the merge base of the base reference and `HEAD` to
/// `HEAD`, i.e. the changes introduced on the pull request branch.
pub struct Git2DiffSource {
    repo: Repository,
}

impl std::fmt::Debug for Git2DiffSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2DiffSource")
            .field("repo", &"<git2::Repository>")
            .finish()
    }
}

impl Git2DiffSource {
    /// Discovers and opens the repository containing `start_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeCollectionError::RepositoryNotAvailable`] when no
    /// repository is found.
    pub fn discover(start_path: &Utf8Path) -> Result<Self, ChangeCollectionError> {
        Repository::discover(start_path.as_std_path())
            .map(Self::from_repository)
            .map_err(|error| ChangeCollectionError::RepositoryNotAvailable {
                message: error.message().to_owned(),
            })
    }

    /// Creates a new instance wrapping an existing repository.
    #[must_use]
    pub const fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Resolves the base reference, preferring the remote-tracking branch
    /// that CI checkouts usually carry.
    fn resolve_base(&self, base_ref: &str) -> Result<Commit<'_>, ChangeCollectionError> {
        let mut candidates = Vec::with_capacity(2);
        if !base_ref.starts_with("origin/") && !base_ref.starts_with("refs/") {
            candidates.push(format!("origin/{base_ref}"));
        }
        candidates.push(base_ref.to_owned());

        candidates
            .iter()
            .find_map(|candidate| {
                self.repo
                    .revparse_single(candidate)
                    .and_then(|object| object.peel_to_commit())
                    .ok()
            })
            .ok_or_else(|| ChangeCollectionError::ReferenceNotFound {
                reference: base_ref.to_owned(),
            })
    }

    fn head_commit(&self) -> Result<Commit<'_>, ChangeCollectionError> {
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|error| ChangeCollectionError::HeadUnavailable {
                message: error.message().to_owned(),
            })
    }

    fn diff_against(&self, base_ref: &str) -> Result<Diff<'_>, ChangeCollectionError> {
        let base = self.resolve_base(base_ref)?;
        let head = self.head_commit()?;

        let start = match self.repo.merge_base(base.id(), head.id()) {
            Ok(oid) => self.repo.find_commit(oid)?,
            Err(error) if error.code() == ErrorCode::NotFound => {
                tracing::debug!(base_ref, "no merge base with HEAD; diffing against base tip");
                base
            }
            Err(error) => return Err(error.into()),
        };

        let old_tree = start.tree()?;
        let new_tree = head.tree()?;
        Ok(self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?)
    }

    fn render_stats(
        &self,
        base_ref: &str,
        format: DiffStatsFormat,
    ) -> Result<String, ChangeCollectionError> {
        let diff = self.diff_against(base_ref)?;
        let buf = diff.stats()?.to_buf(format, STAT_WIDTH)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl DiffSource for Git2DiffSource {
    fn stat_text(&self, base_ref: &str) -> Result<String, ChangeCollectionError> {
        self.render_stats(base_ref, DiffStatsFormat::FULL)
    }

    fn shortstat_text(&self, base_ref: &str) -> Result<String, ChangeCollectionError> {
        self.render_stats(base_ref, DiffStatsFormat::SHORT)
    }

    fn changed_files(&self, base_ref: &str) -> Result<Vec<String>, ChangeCollectionError> {
        let diff = self.diff_against(base_ref)?;
        let mut files: Vec<String> = Vec::new();

        for delta in diff.deltas() {
            let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
                continue;
            };
            let name = path.to_string_lossy().into_owned();
            if !files.contains(&name) {
                files.push(name);
            }
        }

        Ok(files)
    }
}
