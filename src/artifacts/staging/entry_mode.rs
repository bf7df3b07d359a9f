use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry
///
/// Encodes both a permission bit pattern and an implied object kind:
/// regular file, executable file, symbolic link, directory (subtree), or
/// submodule (a commit recorded in an external repository).
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum EntryMode {
    File(FileMode),
    Symlink,
    #[default]
    Directory,
    Submodule,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "040000",
            EntryMode::Submodule => "160000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Symlink => 0o120000,
            EntryMode::Directory => 0o40000,
            EntryMode::Submodule => 0o160000,
        }
    }

    /// The object kind a tree entry with this mode must point at
    pub fn implied_type(&self) -> ObjectType {
        match self {
            EntryMode::File(_) | EntryMode::Symlink => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Submodule => ObjectType::Commit,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn is_submodule(&self) -> bool {
        matches!(self, EntryMode::Submodule)
    }

    /// Parse an octal mode string; accepts both `040000` and `40000` for
    /// directories (trees on disk store the latter).
    pub fn from_octal_str(value: &str) -> anyhow::Result<Self> {
        let mode = u32::from_str_radix(value, 8)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode: {value}"))?;
        Self::try_from(mode)
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 => Ok(EntryMode::File(FileMode::Regular)),
            0o100755 => Ok(EntryMode::File(FileMode::Executable)),
            0o120000 => Ok(EntryMode::Symlink),
            0o40000 => Ok(EntryMode::Directory),
            0o160000 => Ok(EntryMode::Submodule),
            _ => Err(anyhow::anyhow!("Invalid entry mode: {mode:o}")),
        }
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.as_u32()
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}
