//! Path-segment validity
//!
//! A tree entry name must be made of non-empty components that are not
//! reserved names. The check is a pure function on purpose: no process-wide
//! caches or lazily-initialized state are shared with other subsystems.

/// Check that every `/`-separated component of `path` is a valid segment
///
/// Rejects the empty path, empty components, `.`, `..`, and `.git` in any
/// case. Whether a separator may appear at all is the caller's concern; a
/// multi-component path with valid components passes here.
pub fn verify_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    path.split('/').all(is_valid_component)
}

fn is_valid_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.eq_ignore_ascii_case(".git")
}
