use crate::error::InvalidEditError;
use crate::name_parts::NameParts;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Stable identifier handed out by a [`RulePipeline`](crate::pipeline::RulePipeline).
///
/// `RuleId(0)` means "not yet owned by a pipeline".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub u64);

impl RuleId {
    pub const UNASSIGNED: Self = Self(0);

    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Rename,
    Replace,
    Insert,
}

impl EditKind {
    pub const ALL: [Self; 3] = [Self::Rename, Self::Replace, Self::Insert];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rename => "Rename",
            Self::Replace => "Replace",
            Self::Insert => "Insert",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EditKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rename" => Ok(Self::Rename),
            "replace" => Ok(Self::Replace),
            "insert" => Ok(Self::Insert),
            _ => Err(format!("Invalid edit kind: {}", s)),
        }
    }
}

/// Whether a run only computes names or is about to hand them to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Preview,
    Commit,
}

impl ApplyMode {
    pub fn is_preview(self) -> bool {
        self == Self::Preview
    }
}

/// Replaces the whole base name, optionally numbering items in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    pub new_base_name: String,
    pub suffix: String,
    /// Minimum width of the sequence number; 0 disables numbering.
    pub digit_count: u8,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            new_base_name: String::new(),
            suffix: "_".to_string(),
            digit_count: 2,
        }
    }
}

impl RenameConfig {
    /// Zero-padded number for a zero-based batch position.
    pub fn number_suffix(&self, position: usize) -> String {
        if self.digit_count == 0 {
            return String::new();
        }
        format!(
            "{:0width$}",
            position + 1,
            width = usize::from(self.digit_count)
        )
    }

    /// What the first item of a batch would be called, e.g. `tex_01`.
    pub fn example(&self) -> String {
        format!(
            "{}{}{}",
            self.new_base_name,
            self.suffix,
            self.number_suffix(0)
        )
    }

    fn edit(&self, position: Option<usize>) -> String {
        match position {
            None => format!("{}{}", self.new_base_name, self.suffix),
            Some(position) => format!(
                "{}{}{}",
                self.new_base_name,
                self.suffix,
                self.number_suffix(position)
            ),
        }
    }

    fn dotted_field(&self) -> Option<&'static str> {
        if self.new_base_name.contains('.') {
            Some("new_base_name")
        } else if self.suffix.contains('.') {
            Some("suffix")
        } else {
            None
        }
    }
}

/// Substitutes every occurrence of a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceConfig {
    pub search_text: String,
    pub replacement_text: String,
}

impl ReplaceConfig {
    fn edit(&self, base_name: &str) -> Option<String> {
        if self.search_text.is_empty() || !base_name.contains(&self.search_text) {
            return None;
        }
        Some(base_name.replace(&self.search_text, &self.replacement_text))
    }

    fn dotted_field(&self) -> Option<&'static str> {
        if self.search_text.contains('.') {
            Some("search_text")
        } else if self.replacement_text.contains('.') {
            Some("replacement_text")
        } else {
            None
        }
    }
}

/// Inserts text at a character offset, counted from the start or from the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertConfig {
    pub insert_text: String,
    pub insert_index: usize,
    pub reverse_from_end: bool,
}

impl InsertConfig {
    fn edit(&self, base_name: &str) -> Option<String> {
        if self.insert_text.is_empty() {
            return None;
        }

        let len = base_name.chars().count();
        let index = self.insert_index.min(len);

        // Counting from the end, an index of 0 means "after the last character"
        let char_offset = if self.reverse_from_end && index > 0 {
            len - index
        } else if self.reverse_from_end {
            len
        } else {
            index
        };

        let byte_offset = base_name
            .char_indices()
            .nth(char_offset)
            .map_or(base_name.len(), |(i, _)| i);

        let mut result = String::with_capacity(base_name.len() + self.insert_text.len());
        result.push_str(&base_name[..byte_offset]);
        result.push_str(&self.insert_text);
        result.push_str(&base_name[byte_offset..]);
        Some(result)
    }

    fn dotted_field(&self) -> Option<&'static str> {
        self.insert_text.contains('.').then_some("insert_text")
    }
}

/// What a rule does, with the configuration that kind needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleEdit {
    Rename(RenameConfig),
    Replace(ReplaceConfig),
    Insert(InsertConfig),
    /// Kind not understood by this version; never applies. The stored table is
    /// written back untouched.
    #[serde(skip)]
    Unknown(toml::Table),
}

impl RuleEdit {
    pub fn defaults(kind: EditKind) -> Self {
        match kind {
            EditKind::Rename => Self::Rename(RenameConfig::default()),
            EditKind::Replace => Self::Replace(ReplaceConfig::default()),
            EditKind::Insert => Self::Insert(InsertConfig::default()),
        }
    }

    pub fn rename(new_base_name: &str, suffix: &str, digit_count: u8) -> Self {
        Self::Rename(RenameConfig {
            new_base_name: new_base_name.to_string(),
            suffix: suffix.to_string(),
            digit_count,
        })
    }

    pub fn replace(search_text: &str, replacement_text: &str) -> Self {
        Self::Replace(ReplaceConfig {
            search_text: search_text.to_string(),
            replacement_text: replacement_text.to_string(),
        })
    }

    pub fn insert(insert_text: &str, insert_index: usize, reverse_from_end: bool) -> Self {
        Self::Insert(InsertConfig {
            insert_text: insert_text.to_string(),
            insert_index,
            reverse_from_end,
        })
    }

    pub fn kind(&self) -> Option<EditKind> {
        match self {
            Self::Rename(_) => Some(EditKind::Rename),
            Self::Replace(_) => Some(EditKind::Replace),
            Self::Insert(_) => Some(EditKind::Insert),
            Self::Unknown(_) => None,
        }
    }

    /// One-line description of the configuration, used in rule listings.
    pub fn describe(&self) -> String {
        match self {
            Self::Rename(c) => format!(
                "name={:?} suffix={:?} digits={} (e.g. {})",
                c.new_base_name,
                c.suffix,
                c.digit_count,
                c.example()
            ),
            Self::Replace(c) => format!("{:?} -> {:?}", c.search_text, c.replacement_text),
            Self::Insert(c) => format!(
                "{:?} at {}{}",
                c.insert_text,
                c.insert_index,
                if c.reverse_from_end { " from end" } else { "" }
            ),
            Self::Unknown(raw) => match raw.get("kind").and_then(toml::Value::as_str) {
                Some(kind) => format!("unsupported kind {:?}", kind),
                None => "unsupported kind".to_string(),
            },
        }
    }
}

/// Result of applying one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Whether the base name was rewritten.
    pub applied: bool,
    /// Set in preview mode when the edit would be rejected on commit.
    pub warning: Option<InvalidEditError>,
}

impl Applied {
    fn skipped() -> Self {
        Self::default()
    }
}

/// One configured step of a rename pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "toml::Table")]
pub struct RenameRule {
    id: RuleId,
    pub enabled: bool,
    pub edit: RuleEdit,
    display_label: String,
}

/// On-disk shape of a rule: no id, no cached label.
#[derive(Serialize)]
struct RuleRecord<'a> {
    enabled: bool,
    #[serde(flatten)]
    edit: &'a RuleEdit,
}

impl TryFrom<toml::Table> for RenameRule {
    type Error = toml::de::Error;

    fn try_from(mut raw: toml::Table) -> Result<Self, Self::Error> {
        let enabled = match raw.remove("enabled") {
            Some(value) => value.try_into::<bool>()?,
            None => true,
        };

        let kind = match raw.get("kind") {
            Some(toml::Value::String(kind)) => kind.parse::<EditKind>().ok(),
            Some(_) => None,
            None => return Err(serde::de::Error::missing_field("kind")),
        };

        let edit = match kind {
            Some(kind) => {
                raw.insert("kind".to_string(), toml::Value::String(kind.label().to_lowercase()));
                toml::Value::Table(raw).try_into::<RuleEdit>()?
            },
            None => RuleEdit::Unknown(raw),
        };

        let mut rule = Self::new(edit);
        rule.enabled = enabled;
        Ok(rule)
    }
}

impl Serialize for RenameRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.edit {
            RuleEdit::Unknown(raw) => {
                let mut map = serializer.serialize_map(Some(raw.len() + 1))?;
                map.serialize_entry("enabled", &self.enabled)?;
                for (key, value) in raw.iter().filter(|(key, _)| *key != "enabled") {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            },
            edit => RuleRecord {
                enabled: self.enabled,
                edit,
            }
            .serialize(serializer),
        }
    }
}

impl RenameRule {
    /// A new enabled rule not yet owned by any pipeline.
    pub fn new(edit: RuleEdit) -> Self {
        let mut rule = Self {
            id: RuleId::UNASSIGNED,
            enabled: true,
            edit,
            display_label: String::new(),
        };
        rule.refresh_label();
        rule
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: RuleId) {
        self.id = id;
    }

    pub fn kind(&self) -> Option<EditKind> {
        self.edit.kind()
    }

    /// Switch to another kind with that kind's default configuration.
    ///
    /// The display label is left alone until [`refresh_label`](Self::refresh_label) runs.
    pub fn set_kind(&mut self, kind: EditKind) {
        if self.edit.kind() != Some(kind) {
            self.edit = RuleEdit::defaults(kind);
        }
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn refresh_label(&mut self) {
        self.display_label = self
            .edit
            .kind()
            .map_or("None", EditKind::label)
            .to_string();
    }

    /// Apply this rule to `parts`.
    ///
    /// `position` is the item's zero-based place in a multi-item batch and is only
    /// consulted by rename rules. In commit mode a `.` headed for an asset's base
    /// name fails before anything is changed.
    pub fn apply(
        &self,
        parts: &mut NameParts,
        position: Option<usize>,
        mode: ApplyMode,
    ) -> Result<Applied, InvalidEditError> {
        if !self.enabled {
            return Ok(Applied::skipped());
        }

        let (new_base, dotted_field) = match &self.edit {
            RuleEdit::Rename(config) => (Some(config.edit(position)), config.dotted_field()),
            RuleEdit::Replace(config) => (config.edit(&parts.base_name), config.dotted_field()),
            RuleEdit::Insert(config) => (config.edit(&parts.base_name), config.dotted_field()),
            RuleEdit::Unknown(_) => (None, None),
        };

        let Some(new_base) = new_base else {
            return Ok(Applied::skipped());
        };

        let mut warning = None;
        if let (true, Some(field)) = (parts.is_asset(), dotted_field) {
            let error = InvalidEditError {
                field: field.to_string(),
                full_name: rejoin(&new_base, parts.extension()),
                item_name: parts.full_name(),
            };
            match mode {
                ApplyMode::Commit => return Err(error),
                ApplyMode::Preview => {
                    tracing::warn!("{}", error);
                    warning = Some(error);
                },
            }
        }

        tracing::debug!(
            rule = %self.id,
            kind = self.display_label.as_str(),
            from = parts.base_name.as_str(),
            to = new_base.as_str(),
            "rule applied"
        );
        parts.base_name = new_base;

        Ok(Applied {
            applied: true,
            warning,
        })
    }
}

fn rejoin(base_name: &str, extension: &str) -> String {
    if extension.is_empty() {
        base_name.to_string()
    } else {
        format!("{}.{}", base_name, extension)
    }
}
