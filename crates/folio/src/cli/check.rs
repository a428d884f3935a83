//! `folio check` handler.

use super::commands::CheckArgs;
use folio::{
    ConsistencyChecker, FileSystemStore, FolioConfig, FolioResult, NarrativeState,
    NarrativeStore, StorageError, StorageErrorKind, create_driver,
};
use folio_storage::{
    CHARACTER_STATE_FILE, GLOBAL_SUMMARY_FILE, NOVEL_SETTING_FILE, PLOT_ARCS_FILE,
};
use std::path::Path;
use tracing::info;

async fn read_required(path: &Path) -> FolioResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))).into()
    })
}

/// An explicit path must exist; the default file in the store may be absent.
async fn read_state_file(
    store: &FileSystemStore,
    explicit: Option<&Path>,
    default_name: &str,
) -> FolioResult<String> {
    match explicit {
        Some(path) => read_required(path).await,
        None => Ok(store.read_relative(default_name).await?.unwrap_or_default()),
    }
}

/// Audit one chapter and print the report to stdout.
pub async fn run_check(args: CheckArgs, config: &FolioConfig) -> FolioResult<()> {
    let mut store = FileSystemStore::new(&args.dir);
    if args.no_save {
        store = store.read_only();
    }

    let chapter_text = match &args.chapter_file {
        Some(path) => read_required(path).await?,
        None => store.load_chapter(args.chapter).await?.ok_or_else(|| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: chapter not found",
                store.chapter_path(args.chapter).display()
            )))
        })?,
    };

    let state = NarrativeState::new(args.chapter)?
        .with_novel_setting(
            read_state_file(&store, args.setting.as_deref(), NOVEL_SETTING_FILE).await?,
        )
        .with_character_state(
            read_state_file(&store, args.characters.as_deref(), CHARACTER_STATE_FILE).await?,
        )
        .with_global_summary(
            read_state_file(&store, args.summary.as_deref(), GLOBAL_SUMMARY_FILE).await?,
        )
        .with_plot_arcs(read_state_file(&store, args.plot_arcs.as_deref(), PLOT_ARCS_FILE).await?);

    let model_config = config.model_config()?;
    info!(
        chapter = args.chapter,
        dir = %args.dir.display(),
        format = %model_config.interface_format(),
        model = %model_config.model_name(),
        save = !args.no_save,
        "Checking chapter consistency"
    );

    let driver = create_driver(&model_config)?;
    let checker = ConsistencyChecker::from_config(driver, config.audit())?.with_store(store);
    let report = checker.check(&state, &chapter_text).await?;

    println!("{}", report);
    Ok(())
}
