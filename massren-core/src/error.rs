use thiserror::Error;

/// A rule tried to put a `.` into the base name of an asset.
///
/// Raised only when committing; previews report the same condition as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot edit '{item_name}': {field} contains a '.', which is not allowed in asset names (would become '{full_name}')")]
pub struct InvalidEditError {
    /// Rule field holding the offending text, e.g. `new_base_name / suffix`.
    pub field: String,
    /// Full name the edit would have produced.
    pub full_name: String,
    /// Full name of the item before the offending rule ran.
    pub item_name: String,
}

/// Failure reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("'{to}' already exists, refusing to overwrite it with '{from}'")]
    TargetExists { from: String, to: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a single item in a batch could not be processed.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    InvalidEdit(#[from] InvalidEditError),

    #[error("host failed to resolve item: {0}")]
    Resolve(#[source] HostError),

    #[error("host failed to commit rename: {0}")]
    Commit(#[source] HostError),
}

/// Problems reading or writing a rule-set file.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read rule set {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write rule set {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule set {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize rule set")]
    Serialize(#[from] toml::ser::Error),
}

/// A `rules` command that cannot be carried out on the current rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("No rule at position {position} ({count} rules configured)")]
    NoSuchRule { position: usize, count: usize },

    #[error("Cannot move rule to position {position} ({count} rules configured)")]
    MoveOutOfRange { position: usize, count: usize },

    #[error("Rule at position {0} is already first")]
    AlreadyFirst(usize),

    #[error("Rule at position {0} is already last")]
    AlreadyLast(usize),

    #[error("--{flag} does not apply to a {kind} rule")]
    ForeignField { flag: &'static str, kind: &'static str },

    #[error("--digits must be between 0 and {max}, got {digits}")]
    DigitsOutOfRange { digits: u8, max: u8 },

    #[error("Rule has an unknown kind; set --kind before changing its fields")]
    UnknownKind,

    #[error("No enabled rules in {0}")]
    NoEnabledRules(String),
}
