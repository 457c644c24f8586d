//! Shared test utilities for pipeline integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use git2::{ErrorCode, Oid, Repository};
use prsteward::StewardConfig;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Repository slug used by every pipeline test.
pub const REPOSITORY: &str = "owner/repo";
/// Pull request number written to the event payload.
pub const PR_NUMBER: u64 = 42;
/// Issue comments path for [`REPOSITORY`] and [`PR_NUMBER`].
pub const COMMENTS_PATH: &str = "/repos/owner/repo/issues/42/comments";
/// Reviews path for [`REPOSITORY`] and [`PR_NUMBER`].
pub const REVIEWS_PATH: &str = "/repos/owner/repo/pulls/42/reviews";

/// Environment variables the configuration falls back to.
pub const CLEARED_ENV: [(&str, Option<&str>); 9] = [
    ("GITHUB_TOKEN", None),
    ("GITHUB_REPOSITORY", None),
    ("GITHUB_EVENT_PATH", None),
    ("GITHUB_BASE_REF", None),
    ("GITHUB_HEAD_REF", None),
    ("GITHUB_REF", None),
    ("GITHUB_API_URL", None),
    ("GITHUB_WORKSPACE", None),
    ("OPENAI_API_KEY", None),
];

/// Tokio runtime plus a Wiremock server standing in for GitHub and `OpenAI`.
pub struct MockEnvironment {
    runtime: Runtime,
    server: MockServer,
}

impl MockEnvironment {
    /// Starts the runtime and server.
    ///
    /// # Panics
    ///
    /// Panics if the Tokio runtime cannot be created.
    pub fn start() -> Self {
        let runtime =
            Runtime::new().unwrap_or_else(|error| panic!("failed to create runtime: {error}"));
        let server = runtime.block_on(MockServer::start());
        Self { runtime, server }
    }

    /// Mounts a mock on the server.
    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Base URI of the server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

/// Temporary workspace holding a git repository, lint logs, and the event
/// payload.
pub struct Workspace {
    temp: TempDir,
    dir: Dir,
}

impl Workspace {
    /// Creates an empty workspace.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created or opened.
    pub fn new() -> Self {
        let temp = TempDir::new()
            .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
        let dir = Dir::open_ambient_dir(root_of(&temp), ambient_authority())
            .unwrap_or_else(|error| panic!("failed to open temporary directory: {error}"));
        Self { temp, dir }
    }

    /// Root directory path.
    pub fn root(&self) -> Utf8PathBuf {
        root_of(&self.temp)
    }

    /// Writes a file relative to the root, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the write fails.
    pub fn write(&self, path: &str, contents: &str) {
        let relative = Utf8Path::new(path);
        if let Some(parent) = relative.parent()
            && !parent.as_str().is_empty()
        {
            self.dir
                .create_dir_all(parent)
                .unwrap_or_else(|error| panic!("failed to create {parent}: {error}"));
        }
        self.dir
            .write(relative, contents)
            .unwrap_or_else(|error| panic!("failed to write {path}: {error}"));
    }

    /// Writes a `pull_request` event payload and returns its path.
    pub fn write_event(&self) -> String {
        self.write(
            "event.json",
            &format!(r#"{{"action":"opened","pull_request":{{"number":{PR_NUMBER}}}}}"#),
        );
        self.root().join("event.json").into_string()
    }

    /// Initialises a repository whose `origin/main` trails `HEAD` by one
    /// commit touching three files.
    ///
    /// # Panics
    ///
    /// Panics if any git operation fails.
    pub fn init_feature_repository(&self) {
        let repo = Repository::init(self.root().as_std_path())
            .unwrap_or_else(|error| panic!("failed to init repository: {error}"));
        let mut config = repo
            .config()
            .unwrap_or_else(|error| panic!("failed to open git config: {error}"));
        config
            .set_str("user.name", "Test User")
            .and_then(|()| config.set_str("user.email", "test@example.com"))
            .unwrap_or_else(|error| panic!("failed to configure identity: {error}"));

        let base = self.commit(&repo, "base", &[("README.md", "hello\n")]);
        repo.reference("refs/remotes/origin/main", base, true, "test base")
            .unwrap_or_else(|error| panic!("failed to publish base: {error}"));
        self.commit(
            &repo,
            "feature",
            &[
                ("README.md", "hello\nworld\n"),
                ("src/app.js", "const a = 1;\n"),
                ("src/util.js", "export {};\n"),
            ],
        );
    }

    fn commit(&self, repo: &Repository, message: &str, files: &[(&str, &str)]) -> Oid {
        self.try_commit(repo, message, files)
            .unwrap_or_else(|error| panic!("commit `{message}` failed: {error}"))
    }

    fn try_commit(
        &self,
        repo: &Repository,
        message: &str,
        files: &[(&str, &str)],
    ) -> Result<Oid, git2::Error> {
        let mut index = repo.index()?;
        for (path, contents) in files {
            self.write(path, contents);
            index.add_path(Utf8Path::new(path).as_std_path())?;
        }
        index.write()?;

        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = repo.signature()?;
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(error) if error.code() == ErrorCode::UnbornBranch => None,
            Err(error) => return Err(error),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
    }
}

fn root_of(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temporary path is not UTF-8: {}", path.display()))
}

/// Configuration publishing to the mock server from the given workspace.
pub fn publishing_config(mode: &str, workspace: &Workspace, server: &MockEnvironment) -> StewardConfig {
    StewardConfig {
        mode: Some(mode.to_owned()),
        token: Some("ghp_example".to_owned()),
        repository: Some(REPOSITORY.to_owned()),
        event_path: Some(workspace.write_event()),
        base_ref: Some("main".to_owned()),
        head_ref: Some("feature/login".to_owned()),
        api_base: Some(server.uri()),
        ai_base_url: Some(format!("{}/v1", server.uri())),
        ai_model: Some("gpt-test".to_owned()),
        workspace: Some(workspace.root().into_string()),
        ..StewardConfig::default()
    }
}
