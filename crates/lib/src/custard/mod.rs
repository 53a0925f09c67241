//! Custom keyboard layouts ("custards") and tab bars.

mod storage;
mod types;

pub use storage::CustardStore;
pub use types::{
  Custard, CustardEntryMetadata, CustardIndexRecord, CustardMetadata, EditSnapshot, InputStyle, Language, Origin,
  SystemTab, TabBarAction, TabBarData, TabBarItem, TabItemLabel, TabTarget,
};
