use crate::error::InvalidEditError;
use crate::name_parts::NameParts;
use crate::rule::{ApplyMode, EditKind, RenameRule, RuleEdit, RuleId};
use serde::Serialize;
use std::fmt;

/// One line of a preview pass: where the item sits and what it would be called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub element: usize,
    pub original: String,
    pub renamed: String,
    pub is_asset: bool,
    /// Commit-time rejections that the preview let through.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PreviewLine {
    pub fn changed(&self) -> bool {
        self.original != self.renamed
    }
}

impl fmt::Display for PreviewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Element {}: {} -> {}",
            self.element, self.original, self.renamed
        )
    }
}

/// Final name of one item after every rule ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub parts: NameParts,
    pub rules_applied: usize,
    /// Preview-mode warnings, in rule order.
    pub warnings: Vec<InvalidEditError>,
}

/// Ordered rename rules plus the preview lines of the last preview pass.
#[derive(Debug, Default)]
pub struct RulePipeline {
    rules: Vec<RenameRule>,
    previews: Vec<PreviewLine>,
    last_id: u64,
}

impl RulePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline owning `rules` in the given order.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = RenameRule>,
    {
        let mut pipeline = Self::new();
        for rule in rules {
            pipeline.add(rule);
        }
        pipeline.refresh_display_labels();
        pipeline
    }

    fn next_id(&mut self) -> RuleId {
        self.last_id += 1;
        RuleId(self.last_id)
    }

    /// A fresh rule of `kind` with default settings. Not added yet.
    pub fn create_rule(&mut self, kind: EditKind) -> RenameRule {
        self.create_rule_from(RuleEdit::defaults(kind))
    }

    pub fn create_rule_from(&mut self, edit: RuleEdit) -> RenameRule {
        let mut rule = RenameRule::new(edit);
        rule.set_id(self.next_id());
        rule
    }

    /// Deep copy of `rule` under a new id. Not added yet.
    pub fn duplicate_rule(&mut self, rule: &RenameRule) -> RenameRule {
        let mut copy = rule.clone();
        copy.set_id(self.next_id());
        copy.refresh_label();
        copy
    }

    /// Append a rule, giving it a new id if it has none or its id is taken.
    pub fn add(&mut self, mut rule: RenameRule) -> RuleId {
        if !rule.id().is_assigned() || self.position_of(rule.id()).is_some() {
            rule.set_id(self.next_id());
        } else if rule.id().0 > self.last_id {
            self.last_id = rule.id().0;
        }
        let id = rule.id();
        self.rules.push(rule);
        id
    }

    pub fn remove(&mut self, id: RuleId) -> Option<RenameRule> {
        let index = self.position_of(id)?;
        Some(self.rules.remove(index))
    }

    pub fn get_at(&self, index: usize) -> Option<&RenameRule> {
        let rule = self.rules.get(index);
        if rule.is_none() {
            warn_out_of_range("rule", index, self.rules.len());
        }
        rule
    }

    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut RenameRule> {
        let len = self.rules.len();
        let rule = self.rules.get_mut(index);
        if rule.is_none() {
            warn_out_of_range("rule", index, len);
        }
        rule
    }

    pub fn rule(&self, id: RuleId) -> Option<&RenameRule> {
        self.rules.iter().find(|rule| rule.id() == id)
    }

    pub fn rule_mut(&mut self, id: RuleId) -> Option<&mut RenameRule> {
        self.rules.iter_mut().find(|rule| rule.id() == id)
    }

    pub fn position_of(&self, id: RuleId) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id() == id)
    }

    pub fn move_up(&mut self, id: RuleId, current_index: usize) -> bool {
        match current_index.checked_sub(1) {
            Some(new_index) => self.move_rule(id, current_index, new_index),
            None => {
                tracing::warn!("Rule {} is already first", id);
                false
            },
        }
    }

    pub fn move_down(&mut self, id: RuleId, current_index: usize) -> bool {
        match current_index.checked_add(1) {
            Some(new_index) => self.move_rule(id, current_index, new_index),
            None => {
                warn_out_of_range("rule", current_index, self.rules.len());
                false
            },
        }
    }

    /// Move the rule at `from` to `to`, shifting the rules in between.
    ///
    /// Returns false and leaves the order untouched if either index is out of range
    /// or the rule at `from` is not `id`.
    pub fn move_rule(&mut self, id: RuleId, from: usize, to: usize) -> bool {
        let len = self.rules.len();
        if from >= len || to >= len {
            warn_out_of_range("rule", from.max(to), len);
            return false;
        }
        if self.rules[from].id() != id {
            tracing::warn!("Rule at index {} is not {}", from, id);
            return false;
        }

        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        true
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Recompute every rule's label from its current kind.
    pub fn refresh_display_labels(&mut self) {
        for rule in &mut self.rules {
            rule.refresh_label();
        }
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every enabled rule, in order, over one item's name.
    ///
    /// Each rule sees the previous rule's output. `item_index` is passed unchanged
    /// to every rule; it is `None` for single-item batches.
    pub fn run(
        &self,
        item_name: &str,
        is_asset: bool,
        item_index: Option<usize>,
        mode: ApplyMode,
    ) -> Result<RunOutcome, InvalidEditError> {
        let mut parts = NameParts::new(item_name, is_asset);
        let mut rules_applied = 0;
        let mut warnings = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.enabled) {
            let applied = rule.apply(&mut parts, item_index, mode)?;
            if applied.applied {
                rules_applied += 1;
            }
            warnings.extend(applied.warning);
        }

        tracing::debug!(
            item = item_name,
            result = %parts,
            rules_applied,
            "pipeline finished"
        );

        Ok(RunOutcome {
            parts,
            rules_applied,
            warnings,
        })
    }

    /// Append a preview line. A missing index is shown as element 0.
    pub fn record_preview(
        &mut self,
        original_name: &str,
        final_full_name: &str,
        item_index: Option<usize>,
        is_asset: bool,
    ) -> &mut PreviewLine {
        self.previews.push(PreviewLine {
            element: item_index.unwrap_or(0),
            original: original_name.to_string(),
            renamed: final_full_name.to_string(),
            is_asset,
            warnings: Vec::new(),
        });
        let last = self.previews.len() - 1;
        &mut self.previews[last]
    }

    pub fn previews(&self) -> &[PreviewLine] {
        &self.previews
    }

    pub fn preview_at(&self, index: usize) -> Option<&PreviewLine> {
        let line = self.previews.get(index);
        if line.is_none() {
            warn_out_of_range("preview", index, self.previews.len());
        }
        line
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    pub fn preview_strings(&self) -> Vec<String> {
        self.previews.iter().map(ToString::to_string).collect()
    }

    pub fn clear_previews(&mut self) {
        self.previews.clear();
    }
}

fn warn_out_of_range(what: &str, index: usize, len: usize) {
    tracing::warn!("{} index {} is out of range (count {})", what, index, len);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline_with(edits: Vec<RuleEdit>) -> RulePipeline {
        let mut pipeline = RulePipeline::new();
        for edit in edits {
            let rule = pipeline.create_rule_from(edit);
            pipeline.add(rule);
        }
        pipeline
    }

    fn run_name(pipeline: &RulePipeline, name: &str, index: Option<usize>) -> String {
        pipeline
            .run(name, true, index, ApplyMode::Commit)
            .unwrap()
            .parts
            .full_name()
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut pipeline = RulePipeline::new();
        let a = pipeline.create_rule(EditKind::Rename);
        let b = pipeline.create_rule(EditKind::Replace);
        assert_ne!(a.id(), b.id());
        assert!(a.id().is_assigned());
        assert_eq!(b.display_label(), "Replace");
        // Creating does not add
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_duplicate_is_deep_copy() {
        let mut pipeline = pipeline_with(vec![RuleEdit::rename("Tex", "_", 2)]);
        let original = pipeline.get_at(0).unwrap().clone();
        let mut copy = pipeline.duplicate_rule(&original);
        assert_ne!(copy.id(), original.id());

        if let RuleEdit::Rename(config) = &mut copy.edit {
            config.new_base_name = "Mat".to_string();
            config.suffix.push('-');
        }
        let copy_id = pipeline.add(copy);

        assert_eq!(
            pipeline.get_at(0).unwrap().edit,
            RuleEdit::rename("Tex", "_", 2)
        );
        assert_eq!(
            pipeline.rule(copy_id).unwrap().edit,
            RuleEdit::rename("Mat", "_-", 2)
        );
    }

    #[test]
    fn test_add_reassigns_taken_or_missing_ids() {
        let mut pipeline = RulePipeline::new();
        let first = pipeline.create_rule(EditKind::Insert);
        let same = first.clone();
        let id = pipeline.add(first);
        let other = pipeline.add(same);
        assert_ne!(id, other);

        let loose = pipeline.add(RenameRule::new(RuleEdit::replace("a", "b")));
        assert!(loose.is_assigned());
        assert_eq!(pipeline.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut pipeline = pipeline_with(vec![
            RuleEdit::replace("a", "b"),
            RuleEdit::replace("c", "d"),
        ]);
        let id = pipeline.get_at(0).unwrap().id();
        let removed = pipeline.remove(id).unwrap();
        assert_eq!(removed.edit, RuleEdit::replace("a", "b"));
        assert_eq!(pipeline.len(), 1);
        assert!(pipeline.remove(id).is_none());
    }

    #[test]
    fn test_get_at_out_of_range() {
        let mut pipeline = pipeline_with(vec![RuleEdit::replace("a", "b")]);
        assert!(pipeline.get_at(1).is_none());
        assert!(pipeline.get_at_mut(7).is_none());
        assert!(pipeline.preview_at(0).is_none());
    }

    #[test]
    fn test_order_matters() {
        let forward = pipeline_with(vec![
            RuleEdit::rename("foo", "_", 2),
            RuleEdit::insert("X", 0, false),
        ]);
        assert_eq!(run_name(&forward, "anything.png", None), "Xfoo_.png");
        assert_eq!(run_name(&forward, "anything.png", Some(4)), "Xfoo_05.png");

        let reversed = pipeline_with(vec![
            RuleEdit::insert("X", 0, false),
            RuleEdit::rename("foo", "_", 2),
        ]);
        assert_eq!(run_name(&reversed, "anything.png", None), "foo_.png");
    }

    #[test]
    fn test_each_rule_sees_previous_output() {
        let pipeline = pipeline_with(vec![
            RuleEdit::replace("old", "new"),
            RuleEdit::replace("new", "fresh"),
        ]);
        assert_eq!(run_name(&pipeline, "old_rock.png", None), "fresh_rock.png");
    }

    #[test]
    fn test_move_rule_changes_evaluation() {
        let mut pipeline = pipeline_with(vec![
            RuleEdit::insert("A", 0, true),
            RuleEdit::insert("B", 0, true),
            RuleEdit::rename("base", "", 0),
        ]);
        assert_eq!(run_name(&pipeline, "x.txt", None), "base.txt");

        let id = pipeline.get_at(2).unwrap().id();
        assert!(pipeline.move_rule(id, 2, 0));
        assert_eq!(pipeline.position_of(id), Some(0));
        assert_eq!(run_name(&pipeline, "x.txt", None), "baseAB.txt");
    }

    #[test]
    fn test_move_up_and_down() {
        let mut pipeline = pipeline_with(vec![
            RuleEdit::replace("a", "1"),
            RuleEdit::replace("b", "2"),
            RuleEdit::replace("c", "3"),
        ]);
        let first = pipeline.get_at(0).unwrap().id();
        let last = pipeline.get_at(2).unwrap().id();

        assert!(!pipeline.move_up(first, 0));
        assert!(!pipeline.move_down(last, 2));
        assert!(pipeline.move_down(first, 0));
        assert_eq!(pipeline.position_of(first), Some(1));
        assert!(pipeline.move_up(last, 2));
        assert_eq!(pipeline.position_of(last), Some(1));
        assert_eq!(pipeline.position_of(first), Some(2));

        // Wrong id for the index leaves everything alone
        assert!(!pipeline.move_rule(first, 0, 1));
        assert_eq!(pipeline.position_of(first), Some(2));

        // Indices at the edge of usize fail instead of overflowing
        assert!(!pipeline.move_down(first, usize::MAX));
        assert!(!pipeline.move_up(first, usize::MAX));
        assert_eq!(pipeline.position_of(first), Some(2));
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let mut pipeline = pipeline_with(vec![
            RuleEdit::replace("rock", "stone"),
            RuleEdit::insert("_old", 0, true),
        ]);
        pipeline.get_at_mut(1).unwrap().enabled = false;
        let outcome = pipeline
            .run("rock.png", true, None, ApplyMode::Commit)
            .unwrap();
        assert_eq!(outcome.parts.full_name(), "stone.png");
        assert_eq!(outcome.rules_applied, 1);
    }

    #[test]
    fn test_commit_error_stops_the_item() {
        let pipeline = pipeline_with(vec![
            RuleEdit::replace("rock", "stone"),
            RuleEdit::insert(".bak", 0, true),
            RuleEdit::insert("_never", 0, true),
        ]);
        let err = pipeline
            .run("rock.png", true, None, ApplyMode::Commit)
            .unwrap_err();
        assert_eq!(err.field, "insert_text");
        assert_eq!(err.item_name, "stone.png");
        assert_eq!(err.full_name, "stone.bak.png");

        let outcome = pipeline
            .run("rock.png", true, None, ApplyMode::Preview)
            .unwrap();
        assert_eq!(outcome.parts.full_name(), "stone.bak_never.png");
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_refresh_display_labels() {
        let mut pipeline = pipeline_with(vec![RuleEdit::replace("a", "b")]);
        pipeline.get_at_mut(0).unwrap().set_kind(EditKind::Rename);
        assert_eq!(pipeline.get_at(0).unwrap().display_label(), "Replace");
        pipeline.refresh_display_labels();
        assert_eq!(pipeline.get_at(0).unwrap().display_label(), "Rename");
    }

    #[test]
    fn test_record_preview() {
        let mut pipeline = RulePipeline::new();
        pipeline.record_preview("rock.png", "stone.png", None, true);
        pipeline.record_preview("tree.png", "tree.png", Some(3), true);
        pipeline.record_preview("tree.png", "tree.png", Some(3), true);

        assert_eq!(pipeline.preview_count(), 3);
        assert_eq!(pipeline.preview_at(0).unwrap().element, 0);
        assert_eq!(
            pipeline.preview_strings(),
            vec![
                "Element 0: rock.png -> stone.png",
                "Element 3: tree.png -> tree.png",
                "Element 3: tree.png -> tree.png",
            ]
        );
        assert!(pipeline.preview_at(0).unwrap().changed());
        assert!(!pipeline.preview_at(1).unwrap().changed());

        pipeline.clear_previews();
        assert_eq!(pipeline.preview_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut pipeline = pipeline_with(vec![RuleEdit::replace("a", "b")]);
        pipeline.clear();
        assert!(pipeline.is_empty());
        // Ids keep counting after a clear
        let rule = pipeline.create_rule(EditKind::Rename);
        assert_eq!(rule.id(), RuleId(2));
    }
}
