//! Drives version file generation end to end.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::checksum::ChecksumManifest;
use crate::clock::{BuildClock, SystemClock};
use crate::emit;
use crate::error::{Error, Result};
use crate::git::{self, GitLocation, GitProbe, GitRunner, SystemGitRunner, GIT_NA};
use crate::record::{Accessor, CppLiteral, VersionRecord};

/// Version string embedded in the generated file.
pub const LOADGEN_VERSION: &str = ".5a1";

/// Collects every field of the version record for the sources at `root`.
///
/// Timestamps are captured first, then git provenance, then the checksum
/// manifest. Git being unavailable degrades the four git fields to quoted
/// [`GIT_NA`] stubs; a failure to hash the source tree is fatal.
pub fn build_record<C, R>(root: &Path, clock: &C, runner: &R) -> Result<VersionRecord>
where
    C: BuildClock + ?Sized,
    R: GitRunner + ?Sized,
{
    let date_local = clock.build_date_local();
    let date_utc = clock.build_date_utc();

    let location = GitLocation::for_source_root(root);
    let (revision, commit_date, status, log) = match git::probe(&location, runner) {
        GitProbe::Repository(info) => (
            CppLiteral::Quoted(info.revision),
            CppLiteral::Quoted(info.commit_date),
            CppLiteral::Raw(info.status),
            CppLiteral::Raw(info.log),
        ),
        GitProbe::Unavailable => (
            CppLiteral::Quoted(GIT_NA.to_string()),
            CppLiteral::Quoted(GIT_NA.to_string()),
            CppLiteral::Quoted(GIT_NA.to_string()),
            CppLiteral::Quoted(GIT_NA.to_string()),
        ),
    };

    let manifest = ChecksumManifest::for_root(root)?;

    let mut record = VersionRecord::new();
    record.push(
        Accessor::Version,
        CppLiteral::Quoted(LOADGEN_VERSION.to_string()),
    )?;
    record.push(Accessor::BuildDateLocal, CppLiteral::Quoted(date_local))?;
    record.push(Accessor::BuildDateUtc, CppLiteral::Quoted(date_utc))?;
    record.push(Accessor::GitRevision, revision)?;
    record.push(Accessor::GitCommitDate, commit_date)?;
    record.push(Accessor::GitStatus, status)?;
    record.push(Accessor::GitLog, log)?;
    record.push(Accessor::Sha1OfFiles, CppLiteral::Raw(manifest.render()))?;
    record.validate()?;
    Ok(record)
}

/// Builds the record for `root` and writes the rendered file to
/// `out_path`, creating missing output directories.
pub fn generate<C, R>(out_path: &Path, root: &Path, clock: &C, runner: &R) -> Result<()>
where
    C: BuildClock + ?Sized,
    R: GitRunner + ?Sized,
{
    let record = build_record(root, clock, runner)?;
    let contents = emit::render_file(&record);
    write_atomically(out_path, contents.as_bytes())?;
    info!(out = %out_path.display(), "wrote version definitions");
    Ok(())
}

/// Generates the version file using the system clock and the real git
/// binary.
pub fn write_version_file(out_path: &Path, root: &Path) -> Result<()> {
    generate(out_path, root, &SystemClock, &SystemGitRunner::new())
}

/// Writes fully rendered contents through a temp file in the target
/// directory, then renames it over `path`. A reader never observes a
/// half-written file and a failed run leaves any previous file intact.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(contents).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.persist(path).map_err(|err| Error::WriteOutput {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
