//! File names inside a novel's working directory.

/// Directory holding one file per chapter.
pub const CHAPTERS_DIR: &str = "chapters";

/// Accumulated unresolved plot threads.
pub const PLOT_ARCS_FILE: &str = "plot_arcs.txt";

/// World and story setting.
pub const NOVEL_SETTING_FILE: &str = "Novel_architecture.txt";

/// Current character state.
pub const CHARACTER_STATE_FILE: &str = "character_state.txt";

/// Running summary of the story so far.
pub const GLOBAL_SUMMARY_FILE: &str = "global_summary.txt";

/// `chapter_<N>.txt`
pub fn chapter_file_name(index: u32) -> String {
    format!("chapter_{}.txt", index)
}

/// `consistency_report_chapter_<N>.txt`
pub fn report_file_name(chapter_index: u32) -> String {
    format!("consistency_report_chapter_{}.txt", chapter_index)
}
