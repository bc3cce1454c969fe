use crate::error::RulesError;
use crate::output::RulesResult;
use crate::pipeline::RulePipeline;
use crate::rule::{EditKind, RenameRule, RuleEdit, RuleId};
use crate::ruleset::RuleSet;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Largest digit count a rename rule accepts.
pub const MAX_DIGIT_COUNT: u8 = 8;

/// Load the rule set at `path` into a pipeline. A missing file is an empty pipeline.
pub fn load_pipeline(path: &Path) -> Result<RulePipeline> {
    let rules = RuleSet::load_or_default(path)
        .with_context(|| format!("Failed to load rules from {}", path.display()))?;
    Ok(rules.into_pipeline())
}

fn save_pipeline(pipeline: &RulePipeline, path: &Path) -> Result<()> {
    RuleSet::from_pipeline(pipeline)
        .save_to_path(path)
        .with_context(|| format!("Failed to save rules to {}", path.display()))
}

/// Field updates for `rules add` and `rules edit`.
///
/// Only fields belonging to the rule's kind may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChanges {
    pub name: Option<String>,
    pub suffix: Option<String>,
    pub digits: Option<u8>,
    pub search: Option<String>,
    pub replace_with: Option<String>,
    pub text: Option<String>,
    pub index: Option<usize>,
    pub reverse: Option<bool>,
}

impl RuleChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A new edit of `kind` with these changes on top of the kind's defaults.
    pub fn to_edit(&self, kind: EditKind) -> Result<RuleEdit> {
        let mut edit = RuleEdit::defaults(kind);
        self.apply_to(&mut edit)?;
        Ok(edit)
    }

    pub fn apply_to(&self, edit: &mut RuleEdit) -> Result<()> {
        let kind = edit.kind().map_or("unknown", EditKind::label);
        let foreign = |flag| RulesError::ForeignField { flag, kind };

        match edit {
            RuleEdit::Rename(config) => {
                if let Some(digits) = self.digits {
                    if digits > MAX_DIGIT_COUNT {
                        return Err(RulesError::DigitsOutOfRange {
                            digits,
                            max: MAX_DIGIT_COUNT,
                        }
                        .into());
                    }
                    config.digit_count = digits;
                }
                set(&mut config.new_base_name, self.name.as_ref());
                set(&mut config.suffix, self.suffix.as_ref());
                self.reject(&["search", "replace-with", "text", "index", "reverse"], foreign)
            },
            RuleEdit::Replace(config) => {
                set(&mut config.search_text, self.search.as_ref());
                set(&mut config.replacement_text, self.replace_with.as_ref());
                self.reject(&["name", "suffix", "digits", "text", "index", "reverse"], foreign)
            },
            RuleEdit::Insert(config) => {
                set(&mut config.insert_text, self.text.as_ref());
                if let Some(index) = self.index {
                    config.insert_index = index;
                }
                if let Some(reverse) = self.reverse {
                    config.reverse_from_end = reverse;
                }
                self.reject(&["name", "suffix", "digits", "search", "replace-with"], foreign)
            },
            RuleEdit::Unknown(_) => {
                if self.is_empty() {
                    Ok(())
                } else {
                    Err(RulesError::UnknownKind.into())
                }
            },
        }
    }

    fn reject<F>(&self, flags: &[&'static str], error: F) -> Result<()>
    where
        F: Fn(&'static str) -> RulesError,
    {
        match flags.iter().find(|flag| self.is_set(flag)) {
            Some(flag) => Err(error(*flag).into()),
            None => Ok(()),
        }
    }

    fn is_set(&self, flag: &str) -> bool {
        match flag {
            "name" => self.name.is_some(),
            "suffix" => self.suffix.is_some(),
            "digits" => self.digits.is_some(),
            "search" => self.search.is_some(),
            "replace-with" => self.replace_with.is_some(),
            "text" => self.text.is_some(),
            "index" => self.index.is_some(),
            "reverse" => self.reverse.is_some(),
            _ => false,
        }
    }
}

fn set(target: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

/// Changes to the stored rule set, addressed by zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesAction {
    List,
    Add {
        kind: EditKind,
        changes: RuleChanges,
        disabled: bool,
    },
    Edit {
        position: usize,
        kind: Option<EditKind>,
        changes: RuleChanges,
    },
    Duplicate {
        position: usize,
    },
    Remove {
        position: usize,
    },
    MoveUp {
        position: usize,
    },
    MoveDown {
        position: usize,
    },
    Move {
        from: usize,
        to: usize,
    },
    Enable {
        position: usize,
    },
    Disable {
        position: usize,
    },
    Clear,
}

impl RulesAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Duplicate { .. } => "duplicate",
            Self::Remove { .. } => "remove",
            Self::MoveUp { .. } | Self::MoveDown { .. } | Self::Move { .. } => "move",
            Self::Enable { .. } => "enable",
            Self::Disable { .. } => "disable",
            Self::Clear => "clear",
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::List)
    }
}

fn rule_at(pipeline: &RulePipeline, position: usize) -> Result<RuleId, RulesError> {
    pipeline
        .get_at(position)
        .map(RenameRule::id)
        .ok_or(RulesError::NoSuchRule {
            position,
            count: pipeline.len(),
        })
}

fn set_enabled(pipeline: &mut RulePipeline, position: usize, enabled: bool) -> Result<RuleId> {
    let id = rule_at(pipeline, position)?;
    if let Some(rule) = pipeline.rule_mut(id) {
        rule.enabled = enabled;
    }
    Ok(id)
}

/// Rules operation - equivalent to the `massren rules` subcommands
///
/// Loads the rule set at `rules_path`, performs `action` and writes the set back
/// unless the action only reads it.
pub fn rules_operation(rules_path: &Path, action: RulesAction) -> Result<RulesResult> {
    let mut pipeline = load_pipeline(rules_path)?;
    let name = action.name();
    let read_only = action.is_read_only();

    let affected = match action {
        RulesAction::List => None,
        RulesAction::Add {
            kind,
            changes,
            disabled,
        } => {
            let edit = changes.to_edit(kind)?;
            let mut rule = pipeline.create_rule_from(edit);
            rule.enabled = !disabled;
            Some(pipeline.add(rule))
        },
        RulesAction::Edit {
            position,
            kind,
            changes,
        } => {
            let id = rule_at(&pipeline, position)?;
            let rule = pipeline
                .rule_mut(id)
                .ok_or_else(|| anyhow!("Rule {} disappeared", id))?;
            if let Some(kind) = kind {
                rule.set_kind(kind);
            }
            changes.apply_to(&mut rule.edit)?;
            pipeline.refresh_display_labels();
            Some(id)
        },
        RulesAction::Duplicate { position } => {
            let id = rule_at(&pipeline, position)?;
            let original = pipeline
                .rule(id)
                .cloned()
                .ok_or_else(|| anyhow!("Rule {} disappeared", id))?;
            let copy = pipeline.duplicate_rule(&original);
            Some(pipeline.add(copy))
        },
        RulesAction::Remove { position } => {
            let id = rule_at(&pipeline, position)?;
            pipeline.remove(id);
            None
        },
        RulesAction::MoveUp { position } => {
            let id = rule_at(&pipeline, position)?;
            if !pipeline.move_up(id, position) {
                return Err(RulesError::AlreadyFirst(position).into());
            }
            Some(id)
        },
        RulesAction::MoveDown { position } => {
            let id = rule_at(&pipeline, position)?;
            if !pipeline.move_down(id, position) {
                return Err(RulesError::AlreadyLast(position).into());
            }
            Some(id)
        },
        RulesAction::Move { from, to } => {
            let id = rule_at(&pipeline, from)?;
            if !pipeline.move_rule(id, from, to) {
                return Err(RulesError::MoveOutOfRange {
                    position: to,
                    count: pipeline.len(),
                }
                .into());
            }
            Some(id)
        },
        RulesAction::Enable { position } => Some(set_enabled(&mut pipeline, position, true)?),
        RulesAction::Disable { position } => Some(set_enabled(&mut pipeline, position, false)?),
        RulesAction::Clear => {
            pipeline.clear();
            None
        },
    };

    if !read_only {
        save_pipeline(&pipeline, rules_path)?;
        tracing::debug!(action = name, rules = pipeline.len(), "rule set saved");
    }

    Ok(RulesResult::new(name, &pipeline, affected))
}
