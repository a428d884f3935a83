//! End-to-end audit pipeline tests with scripted drivers.

mod test_utils;

use folio_audit::{
    AuditConfig, AuditOutcome, ConsistencyChecker, CrossChapterCheck, EMPTY_CRITIQUE_PLACEHOLDER,
    PromptTemplate,
};
use folio_core::NarrativeState;
use folio_storage::{FileSystemStore, InMemoryStore};
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{ReadOnlyStore, ScriptedDriver, UnreachableDriver};

fn state(chapter: u32) -> NarrativeState {
    NarrativeState::new(chapter)
        .unwrap()
        .with_novel_setting("A kingdom under a frozen sun.")
        .with_character_state("Mira: apprentice cartographer.")
        .with_global_summary("Mira fled the capital.")
        .with_plot_arcs("The stolen map.")
}

#[tokio::test]
async fn test_repeated_paragraph_is_reported() -> anyhow::Result<()> {
    let checker = ConsistencyChecker::new(ScriptedDriver::new(["No conflicts."]));
    let report = checker
        .check(&state(1), "Alice walked home.\n\nAlice walked home.")
        .await?;

    assert!(report.starts_with("No conflicts."));
    assert!(report.contains(
        "- Paragraph 2 duplicates paragraph 1 (similarity: 1.00), excerpt: Alice walked home.\n"
    ));
    assert_eq!(report.matches("- Paragraph").count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_critique_returns_placeholder_without_side_effects() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryStore::new().with_chapter(1, "Earlier chapter."));
    let checker =
        ConsistencyChecker::new(ScriptedDriver::new(["   \n"])).with_shared_store(store.clone());

    let report = checker
        .check(&state(2), "Alice walked home.\n\nAlice walked home.")
        .await?;

    assert_eq!(report, EMPTY_CRITIQUE_PLACEHOLDER);
    assert_eq!(store.report_count().await, 0);
    assert_eq!(store.plot_arcs().await, None);
    Ok(())
}

#[tokio::test]
async fn test_new_plot_arc_is_appended_to_store() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryStore::new().with_plot_arcs("X"));
    let checker = ConsistencyChecker::new(ScriptedDriver::new([
        "情节流畅。\n新增剧情要点: 主角获得神秘卷轴",
    ]))
    .with_shared_store(store.clone());

    let report = checker.check(&state(1), "主角走进山洞。").await?;

    assert_eq!(store.plot_arcs().await.as_deref(), Some("X\n\n主角获得神秘卷轴"));
    assert!(report.contains("[New plot threads / unresolved conflicts]:\n- 主角获得神秘卷轴\n"));
    assert_eq!(store.report(1).await.as_deref(), Some(report.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_first_chapter_skips_previous_check() -> anyhow::Result<()> {
    let store = InMemoryStore::new().with_chapter(0, "should never be read");
    let checker = ConsistencyChecker::new(ScriptedDriver::new(["Fine."])).with_store(store);

    let outcome = checker.audit(&state(1), "Opening.").await?;
    let report = outcome.report().unwrap();

    assert_eq!(report.cross_chapter(), &CrossChapterCheck::Skipped);
    assert!(outcome.to_string().contains("skipped (first chapter or previous chapter not found)"));
    Ok(())
}

#[tokio::test]
async fn test_missing_previous_chapter_skips_check() -> anyhow::Result<()> {
    let checker = ConsistencyChecker::new(ScriptedDriver::new(["Fine."]))
        .with_store(InMemoryStore::new());

    let outcome = checker.audit(&state(5), "Middle of the book.").await?;
    assert_eq!(
        outcome.report().unwrap().cross_chapter(),
        &CrossChapterCheck::Skipped
    );
    Ok(())
}

#[tokio::test]
async fn test_previous_chapter_feeds_prompt_and_duplicate_check() -> anyhow::Result<()> {
    let previous = format!(
        "{}\n\nThe bell tolled three times over the harbour.",
        "Snow fell. ".repeat(60)
    );
    let store = InMemoryStore::new().with_chapter(2, previous);
    let driver = Arc::new(ScriptedDriver::new(["Consistent."]));
    let checker = ConsistencyChecker::new(driver.clone()).with_store(store);

    let outcome = checker
        .audit(
            &state(3),
            "Morning came.\n\nThe bell tolled three times over the harbour.",
        )
        .await?;

    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Snow fell. "));
    assert!(prompts[0].contains("..."));
    // Only the chapter itself carries the bell paragraph; the preview was cut before it.
    assert_eq!(prompts[0].matches("The bell tolled").count(), 1);

    match outcome.report().unwrap().cross_chapter() {
        CrossChapterCheck::Checked(findings) => {
            assert_eq!(findings.len(), 1);
            assert_eq!(*findings[0].paragraph_index(), 2);
            assert_eq!(*findings[0].matched_index(), 2);
        }
        CrossChapterCheck::Skipped => panic!("previous chapter should have been checked"),
    }
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_propagates_and_persists_nothing() {
    let store = Arc::new(InMemoryStore::new().with_plot_arcs("X"));
    let checker = ConsistencyChecker::new(UnreachableDriver).with_shared_store(store.clone());

    let result = checker.check(&state(1), "Text.").await;

    assert!(result.is_err());
    assert_eq!(store.report_count().await, 0);
    assert_eq!(store.plot_arcs().await.as_deref(), Some("X"));
}

#[tokio::test]
async fn test_storage_failures_do_not_fail_the_audit() -> anyhow::Result<()> {
    let store = ReadOnlyStore {
        previous_chapter: Some("Yesterday.".to_string()),
    };
    let checker = ConsistencyChecker::new(ScriptedDriver::new(["New plot thread: a storm"]))
        .with_store(store);

    let report = checker.check(&state(2), "Today.").await?;
    assert!(report.contains("- a storm"));
    Ok(())
}

#[tokio::test]
async fn test_plot_arcs_grow_across_chapters() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryStore::new().with_plot_arcs("seed"));
    let checker = ConsistencyChecker::new(ScriptedDriver::new([
        "新冲突：追兵逼近",
        "No new threads.",
        "New plot point: the map is fake\nNew conflict: Mira distrusts Oren",
    ]))
    .with_shared_store(store.clone());

    let mut previous_len = store.plot_arcs().await.unwrap_or_default().len();
    for chapter in 1..=3 {
        checker.check(&state(chapter), "Chapter text.").await?;
        let len = store.plot_arcs().await.unwrap_or_default().len();
        assert!(len >= previous_len);
        previous_len = len;
    }

    assert_eq!(
        store.plot_arcs().await.as_deref(),
        Some("seed\n\n追兵逼近\n\nthe map is fake\nMira distrusts Oren")
    );
    assert_eq!(store.report_count().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_filesystem_store_end_to_end() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path();
    std::fs::create_dir_all(base.join("chapters"))?;
    std::fs::write(base.join("chapters/chapter_1.txt"), "The gate opened.")?;
    std::fs::write(base.join("plot_arcs.txt"), "X")?;

    let checker = ConsistencyChecker::new(ScriptedDriver::new([
        "新增剧情要点: 主角获得神秘卷轴",
    ]))
    .with_store(FileSystemStore::new(base));

    let report = checker.check(&state(2), "The gate opened.").await?;

    assert_eq!(std::fs::read_to_string(base.join("plot_arcs.txt"))?, "X\n\n主角获得神秘卷轴");
    assert_eq!(
        std::fs::read_to_string(base.join("consistency_report_chapter_2.txt"))?,
        report
    );
    assert!(report.contains("- Paragraph 1 duplicates previous chapter paragraph 1 (similarity: 1.00)"));
    Ok(())
}

#[tokio::test]
async fn test_audit_without_new_threads_keeps_undecodable_plot_arcs() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path();
    // GBK-encoded thread list that cannot be read as UTF-8
    let original: Vec<u8> = vec![0xD6, 0xF7, 0xBD, 0xC7, 0xBB, 0xF1, 0xB5, 0xC3, 0xBE, 0xED, 0xD6, 0xE1];
    std::fs::write(base.join("plot_arcs.txt"), &original)?;

    let checker = ConsistencyChecker::new(ScriptedDriver::new(["No new threads."]))
        .with_store(FileSystemStore::new(base));
    let report = checker.check(&state(1), "The gate opened.").await?;

    assert!(report.starts_with("No new threads."));
    assert_eq!(std::fs::read(base.join("plot_arcs.txt"))?, original);
    assert!(base.join("consistency_report_chapter_1.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_from_config_uses_custom_template() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let template_path = temp_dir.path().join("audit.txt");
    std::fs::write(&template_path, "REVIEW <{chapter_text}>")?;

    let config = AuditConfig::builder()
        .prompt_template_path(template_path)
        .build()?;
    let driver = Arc::new(ScriptedDriver::new(["ok"]));
    let checker = ConsistencyChecker::from_config(driver.clone(), &config)?;

    checker.check(&state(1), "body").await?;
    assert_eq!(driver.prompts(), vec!["REVIEW <body>".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_from_config_rejects_bad_threshold() {
    let config = AuditConfig::builder()
        .similarity_threshold(1.5)
        .build()
        .unwrap();
    assert!(ConsistencyChecker::from_config(ScriptedDriver::default(), &config).is_err());
}

#[tokio::test]
async fn test_chinese_template_and_outcome_variants() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new(["", "无明显冲突，章节内容流畅"]));
    let checker = ConsistencyChecker::new(driver.clone()).with_template(PromptTemplate::chinese());

    assert_eq!(checker.audit(&state(1), "正文").await?, AuditOutcome::NoResponse);
    assert!(matches!(
        checker.audit(&state(1), "正文").await?,
        AuditOutcome::Report(_)
    ));
    assert!(driver.prompts()[0].contains("最新章节内容"));
    Ok(())
}
