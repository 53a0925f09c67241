use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use kbstore_lib::{
  ContainerPaths, CustardStore,
  custard::{Language, Origin},
  util::hash::hash_identifier,
};
use serde::Serialize;

use super::{report, report_load};
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success, print_warning, truncate_token};

/// Keyboard languages a listing can be filtered by.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
  #[value(name = "ja_JP")]
  JaJp,
  #[value(name = "en_US")]
  EnUs,
  #[value(name = "el_GR")]
  ElGr,
}

impl From<LanguageArg> for Language {
  fn from(arg: LanguageArg) -> Self {
    match arg {
      LanguageArg::JaJp => Language::JaJp,
      LanguageArg::EnUs => Language::EnUs,
      LanguageArg::ElGr => Language::ElGr,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum CustardCommand {
  /// List stored custards
  List {
    /// Only custards written for this language
    #[arg(short, long, value_enum)]
    language: Option<LanguageArg>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Remove a custard and its files
  Remove {
    /// Custard identifier
    identifier: String,
  },

  /// Show or set the share link of a custard
  ShareLink {
    /// Custard identifier
    identifier: String,

    /// New link to record
    link: Option<String>,
  },

  /// Print the content token used for a custard's file names
  Hash {
    /// Custard identifier
    identifier: String,
  },
}

pub fn cmd_custards(paths: &ContainerPaths, command: CustardCommand) -> Result<()> {
  let load = || {
    let store = CustardStore::load(paths);
    report_load(store.load_status());
    store
  };

  match command {
    CustardCommand::List { language, output } => cmd_list(&load(), language.map(Language::from), output),
    CustardCommand::Remove { identifier } => cmd_remove(&mut load(), &identifier),
    CustardCommand::ShareLink { identifier, link } => cmd_share_link(&mut load(), &identifier, link),
    CustardCommand::Hash { identifier } => {
      println!("{}", hash_identifier(&identifier));
      Ok(())
    }
  }
}

#[derive(Debug, Serialize)]
struct CustardListItem {
  identifier: String,
  token: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  origin: Option<Origin>,
  #[serde(skip_serializing_if = "Option::is_none")]
  share_link: Option<String>,
}

fn cmd_list(store: &CustardStore, language: Option<Language>, output: OutputFormat) -> Result<()> {
  let identifiers = match language {
    Some(language) => store.available_custards_for(language),
    None => store.available_custards().to_vec(),
  };

  let items: Vec<CustardListItem> = identifiers
    .into_iter()
    .map(|identifier| {
      let metadata = store.metadata().get(&identifier);
      CustardListItem {
        token: hash_identifier(&identifier).to_string(),
        origin: metadata.map(|m| m.origin),
        share_link: metadata.and_then(|m| m.share_link.clone()),
        identifier,
      }
    })
    .collect();

  if output.is_json() {
    #[derive(Serialize)]
    struct ListOutput {
      custards: Vec<CustardListItem>,
    }

    return print_json(&ListOutput { custards: items });
  }

  if items.is_empty() {
    print_info("No custards found");
    return Ok(());
  }

  for item in &items {
    let origin = match item.origin {
      Some(Origin::UserMade) => "user made",
      Some(Origin::Imported) => "imported",
      None => "no metadata",
    };
    println!("{} ({}) - {}", item.identifier, truncate_token(&item.token), origin);
  }
  print_info(&format!("{} custard(s) total", items.len()));
  Ok(())
}

fn cmd_remove(store: &mut CustardStore, identifier: &str) -> Result<()> {
  if !store.available_custards().iter().any(|existing| existing == identifier) {
    bail!("custard '{}' does not exist", identifier);
  }

  report(store.remove_custard(identifier))?;
  print_success(&format!("Removed custard '{}'", identifier));
  Ok(())
}

fn cmd_share_link(store: &mut CustardStore, identifier: &str, link: Option<String>) -> Result<()> {
  let Some(link) = link else {
    match store.share_link(identifier) {
      Some(link) => println!("{}", link),
      None => print_warning(&format!("custard '{}' has no share link", identifier)),
    }
    return Ok(());
  };

  if !report(store.set_share_link(identifier, link.as_str()))? {
    bail!("custard '{}' has no metadata to attach a link to", identifier);
  }
  print_success(&format!("Share link recorded for '{}'", identifier));
  print_stat("link", &link);
  Ok(())
}
