//! TUI screen implementations.

pub mod help;
pub mod profile_entry;
pub mod profile_list;

pub use help::draw_help;
pub use profile_entry::{EntryState, draw_profile_entry};
pub use profile_list::{SavedState, draw_profile_list};
