//! Command-line operations over the saved page.
//!
//! Each invocation works on the page held in the configured storage slot:
//! the caller loads it with [`open_session`], runs one [`Command`], and
//! saves the page back when the command changed it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use pagesmith_config::{AppConfig, PageStore};
use pagesmith_core::{EditorStore, ElementId, ElementUpdate, Props};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the page's elements in order.
    Show,
    /// Replace the saved page with a new empty page.
    New {
        /// Page name.
        name: String,
    },
    /// Add a block.
    Add {
        /// Block type key (e.g. hero1, grid2).
        element_type: String,
        /// Insert at this index instead of appending.
        #[arg(long)]
        at: Option<usize>,
        /// Initial props as a JSON object.
        #[arg(long)]
        props: Option<String>,
    },
    /// Set one nested prop, e.g. `set <id> cta.label '"Start"'`.
    Set {
        id: String,
        /// Dotted path into the element's props.
        path: String,
        /// JSON value; text that is not valid JSON is stored as a string.
        value: String,
    },
    /// Change element flags or type.
    Update {
        id: String,
        #[arg(long = "type")]
        element_type: Option<String>,
        #[arg(long)]
        visible: Option<bool>,
        #[arg(long)]
        locked: Option<bool>,
    },
    /// Delete an element.
    Remove { id: String },
    /// Copy an element directly after itself.
    Duplicate { id: String },
    /// Move the element at one index to another.
    Move { from: usize, to: usize },
    /// Print the page JSON, or write it to a file.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the page with a JSON document read from a file.
    Import { file: PathBuf },
    /// List saved page slots.
    Slots,
    /// Delete a saved page slot.
    Forget { key: String },
}

impl Command {
    /// Whether a successful run changes the page and needs saving.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Command::Show | Command::Export { .. } | Command::Slots | Command::Forget { .. }
        )
    }

    /// Whether the command works on the page in the configured slot.
    pub fn needs_page(&self) -> bool {
        !matches!(self, Command::Slots | Command::Forget { .. })
    }
}

/// Builds the store for one invocation from the configured slot.
///
/// An empty slot starts a fresh page. A slot that cannot be read is an
/// error unless `discard_saved` is set, so a later save cannot overwrite
/// the only copy of the user's page.
pub fn open_session(
    config: AppConfig,
    pages: &PageStore,
    discard_saved: bool,
) -> Result<EditorStore> {
    let key = config.storage_key.clone();
    let mut store = EditorStore::with_config(config);
    match store.load_page(pages) {
        Ok(true) => {}
        Ok(false) => tracing::info!("No saved page yet, starting a new one"),
        Err(e) if discard_saved => {
            tracing::warn!("Discarding unreadable saved page in slot {key}: {e:#}");
        }
        Err(e) => {
            return Err(e.context(format!(
                "Saved page in slot {key} is unreadable; fix it or pass --discard-saved to replace it"
            )));
        }
    }
    Ok(store)
}

/// Parses a CLI value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_props(raw: &str) -> Result<Props> {
    match serde_json::from_str::<Value>(raw).context("--props is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--props must be a JSON object, got {other}"),
    }
}

/// Runs `command` against `store` and `pages`, writing human-readable
/// output to `out`.
pub fn run(
    command: Command,
    store: &mut EditorStore,
    pages: &PageStore,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Show => show(store, out)?,
        Command::New { name } => {
            store.create_new_page(name);
            show(store, out)?;
        }
        Command::Add {
            element_type,
            at,
            props,
        } => {
            let props = props.as_deref().map(parse_props).transpose()?;
            let id = store.create_element(element_type, props, at)?;
            writeln!(out, "added {id}")?;
        }
        Command::Set { id, path, value } => {
            store.update_element_prop(&ElementId::from(id), &path, parse_value(&value))?;
        }
        Command::Update {
            id,
            element_type,
            visible,
            locked,
        } => {
            let mut update = ElementUpdate::default();
            if let Some(element_type) = element_type {
                update = update.element_type(element_type);
            }
            if let Some(visible) = visible {
                update = update.visible(visible);
            }
            if let Some(locked) = locked {
                update = update.locked(locked);
            }
            if update.is_empty() {
                bail!("nothing to update: pass --type, --visible or --locked");
            }
            store.update_element(&ElementId::from(id), update)?;
        }
        Command::Remove { id } => {
            let removed = store.delete_element(&ElementId::from(id))?;
            writeln!(out, "removed {} ({})", removed.id, removed.element_type)?;
        }
        Command::Duplicate { id } => {
            let copy = store.duplicate_element(&ElementId::from(id))?;
            writeln!(out, "added {copy}")?;
        }
        Command::Move { from, to } => {
            store.reorder_elements(from, to)?;
            show(store, out)?;
        }
        Command::Export { out: None } => {
            writeln!(out, "{}", store.export_page())?;
        }
        Command::Export { out: Some(path) } => {
            std::fs::write(&path, store.export_page())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "exported to {}", path.display())?;
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            store
                .import_page(&text)
                .with_context(|| format!("{} is not a valid page", file.display()))?;
            show(store, out)?;
        }
        Command::Slots => {
            for key in pages.list_slots()? {
                match pages.load_meta(&key)? {
                    Some(meta) => writeln!(
                        out,
                        "{key}  {} ({} elements)",
                        meta.page_name, meta.element_count
                    )?,
                    None => writeln!(out, "{key}")?,
                }
            }
        }
        Command::Forget { key } => {
            if pages.remove_slot(&key)? {
                writeln!(out, "removed slot {key}")?;
            } else {
                bail!("no saved slot named {key}");
            }
        }
    }
    Ok(())
}

fn show(store: &EditorStore, out: &mut impl Write) -> Result<()> {
    let Some(page) = store.current_page() else {
        writeln!(out, "(no page)")?;
        return Ok(());
    };
    writeln!(out, "{} [{}]", page.name, page.id)?;
    for element in &page.elements {
        let mut flags = String::new();
        if !element.visible {
            flags.push_str(" hidden");
        }
        if element.locked {
            flags.push_str(" locked");
        }
        writeln!(
            out,
            "{:>3}  {:<16} {}{}",
            element.position, element.element_type, element.id, flags
        )?;
    }
    Ok(())
}
