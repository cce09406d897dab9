//! Git provenance for the generated version file.
//!
//! The checkout layout puts the loadgen sources one directory below the
//! repository root, so every git invocation pins `--git-dir` and
//! `--work-tree` relative to the source root instead of relying on the
//! process working directory.

use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Value embedded for all four git fields when the sources do not live in
/// a usable checkout.
pub const GIT_NA: &str = "NA";

/// How long a single git invocation may run before it is killed.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Repository coordinates derived from the source root: the git directory
/// at `<root>/../.git` and the work tree at `<root>/..`.
#[derive(Debug, Clone)]
pub struct GitLocation {
    git_dir_arg: OsString,
    work_tree_arg: OsString,
}

impl GitLocation {
    pub fn for_source_root(root: &Path) -> Self {
        let work_tree = root.join("..");
        let git_dir = work_tree.join(".git");

        let mut git_dir_arg = OsString::from("--git-dir=");
        git_dir_arg.push(git_dir.as_os_str());
        let mut work_tree_arg = OsString::from("--work-tree=");
        work_tree_arg.push(work_tree.as_os_str());

        Self {
            git_dir_arg,
            work_tree_arg,
        }
    }

    /// Arguments placed before the subcommand on every invocation.
    pub fn base_args(&self) -> [&OsStr; 2] {
        [self.git_dir_arg.as_os_str(), self.work_tree_arg.as_os_str()]
    }
}

/// Captured result of one git invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
}

/// Runs git subcommands against a [`GitLocation`]. Injectable so
/// generation can be tested without a real checkout.
pub trait GitRunner {
    fn run(&self, location: &GitLocation, args: &[&str]) -> io::Result<RunOutput>;
}

/// Runner that shells out to the `git` binary with a bounded wait.
#[derive(Debug, Clone)]
pub struct SystemGitRunner {
    timeout: Duration,
}

impl SystemGitRunner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemGitRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for SystemGitRunner {
    fn run(&self, location: &GitLocation, args: &[&str]) -> io::Result<RunOutput> {
        debug!("running git {}", args.join(" "));
        let mut child = Command::new("git")
            .args(location.base_args())
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        // Drain stdout on a helper thread so a chatty subcommand cannot
        // fill the pipe and deadlock against the exit poll below.
        let Some(mut pipe) = child.stdout.take() else {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "child stdout was not captured",
            ));
        };
        let reader = std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    child.kill()?;
                    child.wait()?;
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "git did not finish within the allotted time",
                    ));
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        };

        let stdout = match reader.join() {
            Ok(read) => read?,
            Err(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "stdout reader thread panicked",
                ));
            }
        };

        Ok(RunOutput {
            success: status.success(),
            stdout,
        })
    }
}

/// Removes one trailing newline from captured git output.
pub fn chomp(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
    }
    value
}

/// The four git-derived values embedded in the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub revision: String,
    pub commit_date: String,
    pub status: String,
    pub log: String,
}

/// Outcome of probing the checkout for git metadata.
#[derive(Debug, Clone)]
pub enum GitProbe {
    /// The sources live in a git checkout and values were captured live.
    Repository(GitInfo),
    /// No usable repository; callers substitute [`GIT_NA`] stubs.
    Unavailable,
}

/// Runs a plain `git status` to decide whether the sources live in a
/// usable repository. A spawn failure or nonzero exit both count as "no".
pub fn detect_repository<R: GitRunner + ?Sized>(location: &GitLocation, runner: &R) -> bool {
    match runner.run(location, &["status"]) {
        Ok(output) => output.success,
        Err(err) => {
            debug!("git detection failed to run: {err}");
            false
        }
    }
}

/// Captures one git query, chomping the trailing newline.
///
/// A nonzero exit still embeds whatever stdout was captured, matching the
/// shell pipeline this replaces. A failure to run at all embeds nothing.
fn query<R: GitRunner + ?Sized>(location: &GitLocation, runner: &R, args: &[&str]) -> String {
    match runner.run(location, args) {
        Ok(output) => {
            if !output.success {
                warn!("git {} exited with failure", args.join(" "));
            }
            chomp(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Err(err) => {
            warn!("git {} failed to run: {err}", args.join(" "));
            String::new()
        }
    }
}

/// Probes the checkout and, when present, captures the four git-derived
/// values: abbreviated HEAD revision, last commit date, porcelain status
/// of tracked files, and the sixteen most recent one-line log entries.
pub fn probe<R: GitRunner + ?Sized>(location: &GitLocation, runner: &R) -> GitProbe {
    if !detect_repository(location, runner) {
        warn!("no usable git repository, emitting stubs");
        return GitProbe::Unavailable;
    }
    let info = GitInfo {
        revision: query(location, runner, &["rev-parse", "--short=10", "HEAD"]),
        commit_date: query(location, runner, &["log", "--format=%cI", "-n", "1"]),
        status: query(location, runner, &["status", "-s", "-uno"]),
        log: query(
            location,
            runner,
            &["log", "--pretty=oneline", "-n", "16", "--no-decorate"],
        ),
    };
    GitProbe::Repository(info)
}
