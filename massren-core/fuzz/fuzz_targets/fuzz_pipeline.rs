#![no_main]

use libfuzzer_sys::fuzz_target;
use massren_core::{ApplyMode, NameParts, RuleEdit, RulePipeline, RuleSet};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let input = String::from_utf8_lossy(&data[3..]);
    let mut fields = input.split('\n').map(|s| s.chars().take(64).collect::<String>());
    let name = fields.next().unwrap_or_default();
    let first = fields.next().unwrap_or_default();
    let second = fields.next().unwrap_or_default();

    let index = usize::from(data[1]);
    let edit = match data[0] % 3 {
        0 => RuleEdit::rename(&first, &second, data[1] % 9),
        1 => RuleEdit::replace(&first, &second),
        _ => RuleEdit::insert(&first, index, data[2] % 2 == 0),
    };

    let mut pipeline = RulePipeline::new();
    let rule = pipeline.create_rule_from(edit);
    pipeline.add(rule);

    let is_asset = data[2] & 2 == 0;
    let position = (data[2] & 4 == 0).then_some(index);
    let _ = NameParts::new(&name, is_asset).full_name();
    let _ = pipeline.run(&name, is_asset, position, ApplyMode::Preview);
    let _ = pipeline.run(&name, is_asset, position, ApplyMode::Commit);

    // Rule sets written out must load back
    if let Ok(toml) = RuleSet::from_pipeline(&pipeline).to_toml_string() {
        assert!(RuleSet::from_toml_str(&toml, Path::new("fuzz.toml")).is_ok());
    }
});
