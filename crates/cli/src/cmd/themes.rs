use anyhow::{Result, bail};
use clap::Subcommand;
use kbstore_lib::{ContainerPaths, ThemeStore, theme::ThemeId};
use serde::Serialize;
use tracing::debug;

use super::{report, report_load};
use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
  /// List themes and the current selection
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Select a theme (both appearances unless --light or --dark is given)
  Select {
    /// Theme id (0 = Default, -1 = Classic)
    #[arg(allow_negative_numbers = true)]
    id: ThemeId,

    /// Only change the light-appearance selection
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Only change the dark-appearance selection
    #[arg(long)]
    dark: bool,
  },

  /// Remove a stored theme
  Remove {
    /// Theme id
    #[arg(allow_negative_numbers = true)]
    id: ThemeId,
  },
}

pub fn cmd_themes(paths: &ContainerPaths, command: ThemeCommand) -> Result<()> {
  let mut store = ThemeStore::load(paths);
  report_load(store.load_status());

  match command {
    ThemeCommand::List { output } => cmd_list(&store, output),
    ThemeCommand::Select { id, light, dark } => cmd_select(&mut store, id, light, dark),
    ThemeCommand::Remove { id } => cmd_remove(&mut store, id),
  }
}

#[derive(Debug, Serialize)]
struct ThemeListItem {
  id: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  title: Option<&'static str>,
  selected: bool,
  selected_dark: bool,
}

fn cmd_list(store: &ThemeStore, output: OutputFormat) -> Result<()> {
  let items: Vec<ThemeListItem> = store
    .indices()
    .into_iter()
    .map(|id| ThemeListItem {
      id: id.raw(),
      title: store.title(id),
      selected: store.selected() == id,
      selected_dark: store.selected_dark() == id,
    })
    .collect();

  if output.is_json() {
    #[derive(Serialize)]
    struct ListOutput {
      themes: Vec<ThemeListItem>,
      selected: i64,
      selected_dark: i64,
    }

    return print_json(&ListOutput {
      themes: items,
      selected: store.selected().raw(),
      selected_dark: store.selected_dark().raw(),
    });
  }

  for item in &items {
    let marker = match (item.selected, item.selected_dark) {
      (true, true) => format!(" {} (light, dark)", symbols::SELECTED),
      (true, false) => format!(" {} (light)", symbols::SELECTED),
      (false, true) => format!(" {} (dark)", symbols::SELECTED),
      (false, false) => String::new(),
    };
    println!("{:>4}  {}{}", item.id, item.title.unwrap_or("user theme"), marker);
  }
  print_info(&format!("{} theme(s) total", items.len()));
  Ok(())
}

fn cmd_select(store: &mut ThemeStore, id: ThemeId, light: bool, dark: bool) -> Result<()> {
  if !store.indices().contains(&id) {
    bail!("theme {} does not exist", id);
  }

  let outcome = match (light, dark) {
    (true, _) => store.select_for_light(id),
    (false, true) => store.select_for_dark(id),
    (false, false) => store.select(id),
  };
  report(outcome)?;
  debug!(theme = %id, light, dark, "selection changed");
  print_success(&format!("Selected theme {}", id));
  Ok(())
}

fn cmd_remove(store: &mut ThemeStore, id: ThemeId) -> Result<()> {
  match id {
    ThemeId::Virtual(builtin) => bail!("built-in theme '{}' cannot be removed", builtin.title()),
    ThemeId::Stored(_) if !store.indices().contains(&id) => bail!("theme {} does not exist", id),
    ThemeId::Stored(_) => {}
  }

  report(store.remove(id))?;
  print_success(&format!("Removed theme {}", id));
  Ok(())
}
