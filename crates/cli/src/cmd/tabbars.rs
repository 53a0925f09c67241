use anyhow::{Result, bail};
use clap::Subcommand;
use kbstore_lib::{
  ContainerPaths, CustardStore,
  custard::{TabBarAction, TabItemLabel, TabTarget},
};
use serde::Serialize;

use super::{report, report_load};
use crate::output::{OutputFormat, print_info, print_json, print_success, print_warning};

#[derive(Subcommand, Debug)]
pub enum TabBarCommand {
  /// List stored tab bars and their items
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Remove a tab bar
  Remove {
    /// Tab bar id
    id: u32,
  },
}

pub fn cmd_tabbars(paths: &ContainerPaths, command: TabBarCommand) -> Result<()> {
  let mut store = CustardStore::load(paths);
  report_load(store.load_status());

  match command {
    TabBarCommand::List { output } => cmd_list(&store, output),
    TabBarCommand::Remove { id } => cmd_remove(&mut store, id),
  }
}

#[derive(Debug, Serialize)]
struct TabBarListItem {
  id: u32,
  /// `None` when the tab bar file is missing or unreadable.
  items: Option<Vec<String>>,
}

fn describe_target(target: &TabTarget) -> String {
  match target {
    TabTarget::System(tab) => format!("{:?}", tab),
    TabTarget::Custom(identifier) => format!("custard '{}'", identifier),
  }
}

fn describe_item(label: &TabItemLabel, actions: &[TabBarAction]) -> String {
  let label = match label {
    TabItemLabel::Text(text) => text.clone(),
    TabItemLabel::Image(name) => format!("[{}]", name),
  };
  let actions: Vec<String> = actions
    .iter()
    .map(|action| match action {
      TabBarAction::MoveTab { tab } => format!("move to {}", describe_target(tab)),
      TabBarAction::Input { text } => format!("input {:?}", text),
    })
    .collect();
  format!("{} -> {}", label, actions.join(", "))
}

fn cmd_list(store: &CustardStore, output: OutputFormat) -> Result<()> {
  let items: Vec<TabBarListItem> = store
    .available_tab_bars()
    .iter()
    .map(|&id| TabBarListItem {
      id,
      items: store.tab_bar(id).ok().map(|bar| {
        bar
          .items
          .iter()
          .map(|item| describe_item(&item.label, &item.actions))
          .collect()
      }),
    })
    .collect();

  if output.is_json() {
    #[derive(Serialize)]
    struct ListOutput {
      tab_bars: Vec<TabBarListItem>,
    }

    return print_json(&ListOutput { tab_bars: items });
  }

  if items.is_empty() {
    print_info("No tab bars found");
    return Ok(());
  }

  for bar in &items {
    println!("Tab bar {}", bar.id);
    match &bar.items {
      Some(entries) => {
        for entry in entries {
          println!("  {}", entry);
        }
      }
      None => print_warning(&format!("tab bar {} is listed but cannot be read", bar.id)),
    }
  }
  print_info(&format!("{} tab bar(s) total", items.len()));
  Ok(())
}

fn cmd_remove(store: &mut CustardStore, id: u32) -> Result<()> {
  if !store.available_tab_bars().contains(&id) {
    bail!("tab bar {} does not exist", id);
  }

  let outcome = store.remove_tab_bar(id);
  let kept = !outcome.is_clean() && store.available_tab_bars().contains(&id);
  report(outcome)?;
  if kept {
    bail!("tab bar {} could not be deleted", id);
  }
  print_success(&format!("Removed tab bar {}", id));
  Ok(())
}
