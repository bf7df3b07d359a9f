#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::predicate;

/// Blob id of the content "test content\n"
pub const BLOB_OID: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

/// Id of the tree with no entries
pub const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Id of the tree holding `100644 test.txt` pointing at [`BLOB_OID`]
pub const SINGLE_FILE_TREE_OID: &str = "d8329fc1cc938780ffdd9f94e0d364e0ea74f579";

/// Create a temp dir and initialize a repository in it
pub fn init_repository() -> Result<assert_fs::TempDir, Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let mut cmd = Command::cargo_bin("twig")?;
    cmd.current_dir(dir.path()).arg("init");

    cmd.assert().success().stdout(predicate::str::contains(
        "Initialized empty Git repository in",
    ));

    Ok(dir)
}

/// Run mktree with the given extra args and stdin, expect success, and
/// return the printed tree ids
pub fn mktree(
    dir: &assert_fs::TempDir,
    args: &[&str],
    input: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("twig")?;
    cmd.current_dir(dir.path())
        .arg("mktree")
        .args(args)
        .write_stdin(input);

    let output = cmd.assert().success().get_output().stdout.clone();

    Ok(String::from_utf8(output)?
        .lines()
        .map(str::to_owned)
        .collect())
}

/// List one level of a stored tree and return the raw stdout
pub fn ls_tree(
    dir: &assert_fs::TempDir,
    sha: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("twig")?;
    cmd.current_dir(dir.path()).arg("ls-tree").arg(sha);

    let output = cmd.assert().success().get_output().stdout.clone();

    Ok(String::from_utf8(output)?)
}
