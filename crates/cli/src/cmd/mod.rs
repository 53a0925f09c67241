mod custards;
mod tabbars;
mod themes;

pub use custards::{CustardCommand, cmd_custards};
pub use tabbars::{TabBarCommand, cmd_tabbars};
pub use themes::{ThemeCommand, cmd_themes};

use anyhow::{Result, bail};
use kbstore_lib::{Outcome, Severity, StoreError, index::LoadStatus};

use crate::output::print_warning;

/// Warn about a store whose index could not be read and was started over.
fn report_load(status: &LoadStatus) {
  if let LoadStatus::Recovered(e) = status {
    print_warning(&format!(
      "index is unreadable and was ignored; saving any change will replace it: {}",
      e
    ));
  }
}

/// Surface absorbed failures; an uncommitted index write is an error.
fn report<T>(outcome: Outcome<T>) -> Result<T> {
  let mut uncommitted: Option<StoreError> = None;
  for issue in outcome.issues {
    match issue.severity {
      Severity::Recoverable => print_warning(&issue.error.to_string()),
      Severity::Uncommitted => uncommitted = Some(issue.error),
    }
  }
  if let Some(e) = uncommitted {
    bail!("change was not saved: {}", e);
  }
  Ok(outcome.value)
}
