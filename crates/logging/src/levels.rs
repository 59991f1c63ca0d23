//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Files copied by the recursive copy helper.
    Copy,
    /// Files removed or replaced.
    Remove,
    /// Entries skipped because they could not be processed.
    Skip,
    /// Directory traversal summaries.
    Walk,
}

impl InfoFlag {
    /// Every info flag, in declaration order.
    pub const ALL: [Self; 4] = [Self::Copy, Self::Remove, Self::Skip, Self::Walk];

    /// Token used when parsing `name[level]` flag strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Remove => "remove",
            Self::Skip => "skip",
            Self::Walk => "walk",
        }
    }
}

/// Debug flags for internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Copy internals (directory creation, byte counts).
    Copy,
    /// Deletion and rename internals.
    Del,
    /// Duplicate (already visited) directory detection.
    Dup,
    /// Low-level read and write calls.
    Io,
    /// Advisory lock acquisition and release.
    Lock,
    /// File open calls and descriptor flags.
    Open,
    /// Directory listing and classification.
    Walk,
}

impl DebugFlag {
    /// Every debug flag, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Copy,
        Self::Del,
        Self::Dup,
        Self::Io,
        Self::Lock,
        Self::Open,
        Self::Walk,
    ];

    /// Token used when parsing `name[level]` flag strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Del => "del",
            Self::Dup => "dup",
            Self::Io => "io",
            Self::Lock => "lock",
            Self::Open => "open",
            Self::Walk => "walk",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Copy level.
    pub copy: u8,
    /// Removal level.
    pub remove: u8,
    /// Skipped-entry level.
    pub skip: u8,
    /// Traversal summary level.
    pub walk: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Copy => self.copy,
            InfoFlag::Remove => self.remove,
            InfoFlag::Skip => self.skip,
            InfoFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Copy => self.copy = level,
            InfoFlag::Remove => self.remove = level,
            InfoFlag::Skip => self.skip = level,
            InfoFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Copy internals level.
    pub copy: u8,
    /// Deletion internals level.
    pub del: u8,
    /// Duplicate detection level.
    pub dup: u8,
    /// I/O level.
    pub io: u8,
    /// Locking level.
    pub lock: u8,
    /// Open call level.
    pub open: u8,
    /// Directory listing level.
    pub walk: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Copy => self.copy,
            DebugFlag::Del => self.del,
            DebugFlag::Dup => self.dup,
            DebugFlag::Io => self.io,
            DebugFlag::Lock => self.lock,
            DebugFlag::Open => self.open,
            DebugFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Copy => self.copy = level,
            DebugFlag::Del => self.del = level,
            DebugFlag::Dup => self.dup = level,
            DebugFlag::Io => self.io = level,
            DebugFlag::Lock => self.lock = level,
            DebugFlag::Open => self.open = level,
            DebugFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
