use massren_core::{
    run_batch, ApplyMode, EditKind, ItemError, ItemList, MemoryHost, RuleEdit, RulePipeline,
    RuleSet,
};
use std::path::Path;

fn pipeline_of(edits: &[RuleEdit]) -> RulePipeline {
    let mut pipeline = RulePipeline::new();
    for edit in edits {
        let rule = pipeline.create_rule_from(edit.clone());
        pipeline.add(rule);
    }
    pipeline
}

fn object_result(pipeline: &RulePipeline, name: &str, position: Option<usize>) -> String {
    pipeline
        .run(name, false, position, ApplyMode::Commit)
        .unwrap()
        .parts
        .full_name()
}

#[test]
fn test_rename_ignores_previous_name() {
    let pipeline = pipeline_of(&[RuleEdit::rename("foo", "_", 2)]);
    assert_eq!(object_result(&pipeline, "anything at all", None), "foo_");
    assert_eq!(object_result(&pipeline, "x", Some(0)), "foo_01");
    assert_eq!(object_result(&pipeline, "x", Some(9)), "foo_10");
    assert_eq!(object_result(&pipeline, "x", Some(99)), "foo_100");

    let unnumbered = pipeline_of(&[RuleEdit::rename("foo", "_", 0)]);
    assert_eq!(object_result(&unnumbered, "x", Some(41)), "foo_");
}

#[test]
fn test_replace_and_insert_examples() {
    let replace = pipeline_of(&[RuleEdit::replace("a", "b")]);
    assert_eq!(object_result(&replace, "banana", None), "bbnbnb");

    let forward = pipeline_of(&[RuleEdit::insert("X", 2, false)]);
    assert_eq!(object_result(&forward, "hello", None), "heXllo");

    let reverse = pipeline_of(&[RuleEdit::insert("X", 2, true)]);
    assert_eq!(object_result(&reverse, "hello", None), "helXlo");

    let append = pipeline_of(&[RuleEdit::insert("X", 0, true)]);
    assert_eq!(object_result(&append, "hello", None), "helloX");
}

#[test]
fn test_rule_order_matters() {
    let rename_first = pipeline_of(&[
        RuleEdit::rename("foo", "_", 2),
        RuleEdit::insert("X", 0, false),
    ]);
    assert_eq!(object_result(&rename_first, "input", None), "Xfoo_");
    assert_eq!(object_result(&rename_first, "input", Some(2)), "Xfoo_03");

    let insert_first = pipeline_of(&[
        RuleEdit::insert("X", 0, false),
        RuleEdit::rename("foo", "_", 2),
    ]);
    assert_eq!(object_result(&insert_first, "input", None), "foo_");
}

#[test]
fn test_moving_a_rule_changes_what_later_rules_see() {
    let mut pipeline = pipeline_of(&[
        RuleEdit::replace("cat", "dog"),
        RuleEdit::insert("_hd", 0, true),
        RuleEdit::rename("cat", "", 0),
    ]);
    assert_eq!(object_result(&pipeline, "bird", None), "cat");

    let rename = pipeline.get_at(2).unwrap().id();
    assert!(pipeline.move_rule(rename, 2, 0));
    assert_eq!(object_result(&pipeline, "bird", None), "dog_hd");
}

#[test]
fn test_duplicate_is_independent() {
    let mut pipeline = RulePipeline::new();
    let original = pipeline.create_rule_from(RuleEdit::replace("old", "new"));
    let original_id = pipeline.add(original);

    let source = pipeline.rule(original_id).unwrap().clone();
    let copy = pipeline.duplicate_rule(&source);
    let copy_id = pipeline.add(copy);
    assert_ne!(original_id, copy_id);

    if let RuleEdit::Replace(config) = &mut pipeline.rule_mut(copy_id).unwrap().edit {
        config.search_text.push_str("er");
        config.replacement_text = "newer".to_string();
    }

    assert_eq!(
        pipeline.rule(original_id).unwrap().edit,
        RuleEdit::replace("old", "new")
    );
}

#[test]
fn test_asset_dot_safety() {
    let pipeline = pipeline_of(&[RuleEdit::rename("a.b", "_", 2)]);

    let err = pipeline
        .run("rock.png", true, None, ApplyMode::Commit)
        .unwrap_err();
    assert_eq!(err.field, "new_base_name");
    assert_eq!(err.full_name, "a.b_.png");

    let preview = pipeline
        .run("rock.png", true, None, ApplyMode::Preview)
        .unwrap();
    assert_eq!(preview.parts.full_name(), "a.b_.png");
    assert_eq!(preview.warnings.len(), 1);

    // Objects have no extension to protect
    assert_eq!(object_result(&pipeline, "Node", None), "a.b_");
}

#[test]
fn test_batch_keeps_going_after_a_failure() {
    let mut host = MemoryHost::new();
    let items = ItemList::from_items([
        host.add("rock.png", true),
        host.add("Enemy", false),
        host.add("moss.png", true),
    ]);
    let mut pipeline = pipeline_of(&[RuleEdit::replace("o", ".o")]);

    let report = run_batch(&mut pipeline, &mut host, &items, ApplyMode::Commit);

    assert_eq!(report.failures.len(), 2);
    assert!(matches!(report.failures[0].error, ItemError::InvalidEdit(_)));
    assert_eq!(report.failures[1].index, 2);
    assert_eq!(host.name(0), Some("rock.png"));
    assert_eq!(host.name(1), Some("Enemy"));
    assert_eq!(report.items.len(), 1);
}

#[test]
fn test_batch_positions_count_empty_slots() {
    let mut host = MemoryHost::new();
    let mut items = ItemList::new();
    items.push(host.add("a.png", true));
    items.push_empty();
    items.push(host.add("c.png", true));
    let mut pipeline = pipeline_of(&[RuleEdit::rename("Tex", "_", 2)]);

    let report = run_batch(&mut pipeline, &mut host, &items, ApplyMode::Preview);
    assert_eq!(report.skipped_empty, 1);
    assert_eq!(
        pipeline.preview_strings(),
        vec![
            "Element 0: a.png -> Tex_01.png",
            "Element 2: c.png -> Tex_03.png"
        ]
    );
}

#[test]
fn test_rule_set_round_trip_drives_same_pipeline() {
    let mut pipeline = pipeline_of(&[
        RuleEdit::rename("Tex", "-", 3),
        RuleEdit::insert("_hd", 0, true),
    ]);
    let second = pipeline.get_at(1).unwrap().id();
    pipeline.rule_mut(second).unwrap().enabled = false;

    let toml = RuleSet::from_pipeline(&pipeline).to_toml_string().unwrap();
    let reloaded = RuleSet::from_toml_str(&toml, Path::new("rules.toml"))
        .unwrap()
        .into_pipeline();

    assert_eq!(reloaded.len(), 2);
    assert!(!reloaded.get_at(1).unwrap().enabled);
    assert_eq!(reloaded.get_at(0).unwrap().kind(), Some(EditKind::Rename));
    assert_eq!(object_result(&reloaded, "x", Some(4)), "Tex-005");
}
