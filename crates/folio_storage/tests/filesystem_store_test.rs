//! Tests for the filesystem narrative store.

use folio_storage::{FileSystemStore, NarrativeStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_files_load_as_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path());

    assert_eq!(store.load_chapter(1).await.unwrap(), None);
    assert_eq!(store.load_plot_arcs().await.unwrap(), None);
}

#[tokio::test]
async fn test_load_chapter_reads_chapters_dir() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("chapters")).unwrap();
    std::fs::write(
        temp_dir.path().join("chapters/chapter_2.txt"),
        "The lighthouse was dark.",
    )
    .unwrap();

    let store = FileSystemStore::new(temp_dir.path());
    assert_eq!(
        store.load_chapter(2).await.unwrap().as_deref(),
        Some("The lighthouse was dark.")
    );
}

#[tokio::test]
async fn test_append_plot_arcs_creates_and_extends_file() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("novel");
    let store = FileSystemStore::new(&base);

    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("plot_arcs.txt"), "X").unwrap();

    let merged = store
        .append_plot_arcs(&["主角获得神秘卷轴".to_string()])
        .await
        .unwrap();
    assert_eq!(merged, "X\n\n主角获得神秘卷轴");
    assert_eq!(
        std::fs::read_to_string(base.join("plot_arcs.txt")).unwrap(),
        "X\n\n主角获得神秘卷轴"
    );

    let unchanged = store.append_plot_arcs(&[]).await.unwrap();
    assert_eq!(unchanged, "X\n\n主角获得神秘卷轴");
}

#[tokio::test]
async fn test_save_report_creates_base_directory() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("fresh");
    let store = FileSystemStore::new(&base);

    store.save_report(7, "report body").await.unwrap();
    store.save_report(7, "second run").await.unwrap();

    assert_eq!(
        std::fs::read_to_string(base.join("consistency_report_chapter_7.txt")).unwrap(),
        "second run"
    );
}

#[tokio::test]
async fn test_read_relative_for_state_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("character_state.txt"), "Mira: injured").unwrap();

    let store = FileSystemStore::new(temp_dir.path());
    assert_eq!(
        store
            .read_relative("character_state.txt")
            .await
            .unwrap()
            .as_deref(),
        Some("Mira: injured")
    );
    assert_eq!(store.read_relative("global_summary.txt").await.unwrap(), None);
}

#[tokio::test]
async fn test_undecodable_plot_arcs_are_treated_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    // "剧情" in GBK, which is not valid UTF-8
    std::fs::write(temp_dir.path().join("plot_arcs.txt"), [0xBE, 0xE7, 0xC7, 0xE9]).unwrap();

    let store = FileSystemStore::new(temp_dir.path());
    assert!(store.load_plot_arcs().await.is_err());

    let merged = store.append_plot_arcs(&["a".to_string()]).await.unwrap();
    assert_eq!(merged, "\n\na");
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("plot_arcs.txt")).unwrap(),
        "\n\na"
    );
}

#[tokio::test]
async fn test_no_entries_leaves_undecodable_plot_arcs_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let original = vec![0xBE, 0xE7, 0xC7, 0xE9, b'\n', 0xD2, 0xAA, 0xB5, 0xE3];
    std::fs::write(temp_dir.path().join("plot_arcs.txt"), &original).unwrap();

    let store = FileSystemStore::new(temp_dir.path());
    store.append_plot_arcs(&[]).await.unwrap();

    assert_eq!(
        std::fs::read(temp_dir.path().join("plot_arcs.txt")).unwrap(),
        original
    );
}

#[tokio::test]
async fn test_no_entries_keeps_readable_plot_arcs() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("plot_arcs.txt"), "The stolen map.").unwrap();

    let store = FileSystemStore::new(temp_dir.path());
    let merged = store.append_plot_arcs(&[]).await.unwrap();

    assert_eq!(merged, "The stolen map.");
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("plot_arcs.txt")).unwrap(),
        "The stolen map."
    );
}

#[tokio::test]
async fn test_read_only_store_reads_but_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("chapters")).unwrap();
    std::fs::write(temp_dir.path().join("chapters/chapter_1.txt"), "Prologue.").unwrap();

    let store = FileSystemStore::new(temp_dir.path()).read_only();
    assert!(store.is_read_only());
    assert_eq!(
        store.load_chapter(1).await.unwrap().as_deref(),
        Some("Prologue.")
    );

    store.append_plot_arcs(&["thread".to_string()]).await.unwrap();
    store.save_report(2, "report").await.unwrap();

    assert!(!temp_dir.path().join("plot_arcs.txt").exists());
    assert!(!temp_dir.path().join("consistency_report_chapter_2.txt").exists());
}
