//! Narrative state storage for Folio.
//!
//! An audit reads the previous chapter and the accumulated plot threads, and
//! writes back the extended thread list and the rendered report. Those four
//! operations make up [`NarrativeStore`]; [`FileSystemStore`] maps them onto
//! a novel's working directory and [`InMemoryStore`] keeps them in memory.
//!
//! # Directory layout
//!
//! ```text
//! <base>/
//! ├── chapters/
//! │   └── chapter_<N>.txt
//! ├── plot_arcs.txt
//! └── consistency_report_chapter_<N>.txt
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod layout;
mod memory;
mod traits;

pub use filesystem::FileSystemStore;
pub use layout::{
    CHAPTERS_DIR, CHARACTER_STATE_FILE, GLOBAL_SUMMARY_FILE, NOVEL_SETTING_FILE, PLOT_ARCS_FILE,
    chapter_file_name, report_file_name,
};
pub use memory::InMemoryStore;
pub use traits::{NarrativeStore, merge_plot_arcs};
