//! Catalog editing commands.

use std::path::Path;

use crate::bang::{BangDraft, BangEntry};
use crate::services::catalog::{BuiltinSource, CatalogStore};
use crate::services::kagi;

pub fn run_list(store: &CatalogStore, custom_only: bool, json: bool) -> anyhow::Result<()> {
    let entries = if custom_only {
        let mut custom = store.load_custom();
        custom.sort_by_key(BangEntry::key);
        custom
    } else {
        store.load_all()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_row(entry));
    }
    println!("{} bangs", entries.len());
    Ok(())
}

fn format_row(entry: &BangEntry) -> String {
    let triggers: Vec<String> = entry.all_triggers().map(|t| format!("!{}", t)).collect();
    let marker = if entry.is_custom() { "*" } else { " " };
    format!(
        "{} {:<24} {:<28} {}",
        marker,
        triggers.join(" "),
        entry.name,
        entry.url_template
    )
}

pub fn run_add(store: &CatalogStore, draft: BangDraft) -> anyhow::Result<()> {
    let entry = draft.into_entry();
    let trigger = entry.trigger.clone();
    store.add_or_update(entry)?;
    println!("Saved !{}", trigger);
    Ok(())
}

pub fn run_delete(store: &CatalogStore, trigger: &str) -> anyhow::Result<()> {
    let trigger = trigger.trim_start_matches('!');
    store.delete_by_trigger(trigger);
    println!("Deleted !{}", trigger);
    Ok(())
}

pub fn run_status(store: &CatalogStore) -> anyhow::Result<()> {
    let paths = store.paths();
    let builtin = match &paths.builtin {
        BuiltinSource::Embedded => "embedded".to_string(),
        BuiltinSource::File(path) => path.display().to_string(),
    };

    println!("Built-in: {} ({} bangs)", builtin, store.load_builtin().len());
    println!(
        "Custom:   {} ({} bangs)",
        paths.custom.display(),
        store.load_custom().len()
    );
    println!("Version:  {}", store.current_version());
    Ok(())
}

pub fn run_convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let count = kagi::convert_file(input, output)?;
    println!("Converted {} bangs to {}", count, output.display());
    Ok(())
}
