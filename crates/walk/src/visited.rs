use rustc_hash::FxHashSet;
use std::fs;

/// Physical identity of a directory: the device and inode it lives on.
///
/// Two paths that reach the same directory through symlinks or bind mounts
/// share a `DirectoryId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryId {
    /// Device identifier (`st_dev`).
    pub device: u64,
    /// Inode number (`st_ino`).
    pub inode: u64,
}

impl DirectoryId {
    /// Creates an identity from raw device and inode numbers.
    #[must_use]
    pub const fn new(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }

    /// Extracts the identity from symlink-resolved metadata.
    ///
    /// Returns `None` on platforms without inode numbers.
    #[cfg(unix)]
    #[must_use]
    pub fn of(metadata: &fs::Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;

        Some(Self::new(metadata.dev(), metadata.ino()))
    }

    /// Extracts the identity from symlink-resolved metadata.
    ///
    /// Returns `None` on platforms without inode numbers.
    #[cfg(not(unix))]
    #[must_use]
    pub fn of(_metadata: &fs::Metadata) -> Option<Self> {
        None
    }

    /// Reports whether the identity can be trusted for cycle detection.
    ///
    /// Some filesystems (FAT, NTFS through certain drivers) report inode `0`
    /// for every entry.
    #[must_use]
    pub const fn is_trackable(&self) -> bool {
        self.inode != 0
    }
}

/// Set of directories already entered during a traversal.
///
/// A walker takes the set by value and returns it through
/// [`Walker::into_visited`](crate::Walker::into_visited), so a caller can
/// seed a later traversal with the directories an earlier one covered.
/// The set carries no synchronization; sharing one between concurrent
/// traversals requires the caller to serialize access.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    nodes: FxHashSet<DirectoryId>,
}

impl VisitedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`, returning `false` if it was already present.
    ///
    /// Identities with inode `0` are never stored and always report `true`.
    pub fn insert(&mut self, id: DirectoryId) -> bool {
        if !id.is_trackable() {
            return true;
        }
        self.nodes.insert(id)
    }

    /// Reports whether `id` has been recorded.
    #[must_use]
    pub fn contains(&self, id: &DirectoryId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of recorded directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether no directory has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the recorded identities in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &DirectoryId> {
        self.nodes.iter()
    }
}

impl FromIterator<DirectoryId> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = DirectoryId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Extend<DirectoryId> for VisitedSet {
    fn extend<I: IntoIterator<Item = DirectoryId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}
