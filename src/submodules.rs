//! Git submodule initialization and per-record synchronization.
//!
//! Initialization is idempotent: `git submodule update --init --recursive`
//! on an already-initialized tree is a no-op success. Each tracked submodule
//! carries its own failure policy; records that are not explicitly updated
//! keep whatever ref the parent tree records.

use std::path::Path;

use crate::error::SyncError;
use crate::exec::Executor;
use crate::logging::Logger;

/// One tracked external source tree and the ref it must be synchronized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submodule {
    /// Checkout path relative to the project root.
    pub path: &'static str,
    /// Branch or tag to pin the submodule to.
    pub branch: &'static str,
    /// Disabled records are declared but skipped entirely.
    pub enabled: bool,
    /// Whether a failed update aborts the run (otherwise warn and continue).
    pub required: bool,
}

/// Initialize all submodules recorded by the parent tree.
///
/// # Errors
///
/// Returns [`SyncError`] if the root is not a git work tree or the
/// initialization command fails.
pub fn init(executor: &dyn Executor, log: &Logger, root: &Path) -> Result<(), SyncError> {
    let probe = executor
        .run_in_unchecked(root, "git", &["rev-parse", "--is-inside-work-tree"])
        .map_err(|e| SyncError::InitFailed {
            message: e.to_string(),
        })?;
    if !probe.success {
        return Err(SyncError::NotARepository {
            root: root.to_path_buf(),
        });
    }

    log.debug("running git submodule update --init --recursive");
    let result = executor
        .run_in_unchecked(root, "git", &["submodule", "update", "--init", "--recursive"])
        .map_err(|e| SyncError::InitFailed {
            message: e.to_string(),
        })?;
    if !result.success {
        return Err(SyncError::InitFailed {
            message: result.stderr.trim().to_string(),
        });
    }
    log.info("submodules initialized");
    Ok(())
}

/// Pin one submodule to its target branch, fetching first so a stale local
/// ref does not mask the checkout.
///
/// # Errors
///
/// Returns [`SyncError`] if the submodule path is missing or any git step
/// fails; the caller applies the record's failure policy.
pub fn update(
    executor: &dyn Executor,
    log: &Logger,
    root: &Path,
    submodule: &Submodule,
) -> Result<(), SyncError> {
    let dir = root.join(submodule.path);
    // A submodule checkout has a `.git` entry (a file pointing at the parent's
    // module store).
    if !dir.join(".git").exists() {
        return Err(SyncError::MissingPath { path: dir });
    }

    let fail = |message: String| SyncError::UpdateFailed {
        path: submodule.path.to_string(),
        branch: submodule.branch.to_string(),
        message,
    };

    log.debug(&format!(
        "fetching origin for {} (target '{}')",
        submodule.path, submodule.branch
    ));
    let fetch = executor
        .run_in_unchecked(&dir, "git", &["fetch", "origin"])
        .map_err(|e| fail(e.to_string()))?;
    if !fetch.success {
        return Err(fail(fetch.stderr.trim().to_string()));
    }

    let checkout = executor
        .run_in_unchecked(&dir, "git", &["checkout", submodule.branch])
        .map_err(|e| fail(e.to_string()))?;
    if !checkout.success {
        return Err(fail(checkout.stderr.trim().to_string()));
    }

    // Fast-forward when the target is a branch; a tag checkout leaves a
    // detached HEAD where pulling is expected to fail.
    let pull = executor
        .run_in_unchecked(
            &dir,
            "git",
            &["pull", "--ff-only", "origin", submodule.branch],
        )
        .map_err(|e| fail(e.to_string()))?;
    if !pull.success {
        log.debug(&format!(
            "pull skipped for {} (detached or up to date)",
            submodule.path
        ));
    }

    log.info(&format!("{} @ {}", submodule.path, submodule.branch));
    Ok(())
}

/// Synchronize every enabled record, applying each record's failure policy.
///
/// # Errors
///
/// Returns the first [`SyncError`] from a record marked `required`; failures
/// of non-required records are reported and skipped.
pub fn sync_all(
    executor: &dyn Executor,
    log: &Logger,
    root: &Path,
    submodules: &[Submodule],
) -> Result<(), SyncError> {
    for submodule in submodules.iter().filter(|s| s.enabled) {
        match update(executor, log, root, submodule) {
            Ok(()) => {}
            Err(e) if submodule.required => return Err(e),
            Err(e) => log.warn(&format!("{e} (continuing)")),
        }
    }
    Ok(())
}
