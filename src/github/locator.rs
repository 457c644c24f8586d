//! Identity wrappers for the repository and pull request being annotated.

use super::error::PublishError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str, slug: &str) -> Result<Self, PublishError> {
        if value.is_empty() {
            return Err(PublishError::InvalidRepository {
                slug: slug.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str, slug: &str) -> Result<Self, PublishError> {
        if value.is_empty() {
            return Err(PublishError::InvalidRepository {
                slug: slug.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository identified by its `owner/name` slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositorySlug {
    /// Parses a slug such as `octo/hello-world` (the `GITHUB_REPOSITORY`
    /// format).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidRepository`] unless the input has
    /// exactly two non-empty segments separated by `/`.
    pub fn parse(input: &str) -> Result<Self, PublishError> {
        let trimmed = input.trim();
        let mut segments = trimmed.split('/');
        let owner_segment = segments.next().unwrap_or_default();
        let name_segment = segments.next().unwrap_or_default();

        if segments.next().is_some() {
            return Err(PublishError::InvalidRepository {
                slug: trimmed.to_owned(),
            });
        }

        Ok(Self {
            owner: RepositoryOwner::new(owner_segment, trimmed)?,
            name: RepositoryName::new(name_segment, trimmed)?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }
}

impl std::fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, PublishError> {
        if value == 0 {
            return Err(PublishError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, PublishError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PublishError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// The pull request that comments and reviews are published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    repository: RepositorySlug,
    number: PullRequestNumber,
}

impl PullRequestTarget {
    /// Creates a target from its parts.
    #[must_use]
    pub const fn new(repository: RepositorySlug, number: PullRequestNumber) -> Self {
        Self { repository, number }
    }

    /// Repository that owns the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.repository.owner.as_str(),
            self.repository.name.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn reviews_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.repository.owner.as_str(),
            self.repository.name.as_str(),
            self.number.get()
        )
    }
}

impl std::fmt::Display for PullRequestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.repository, self.number.get())
    }
}
