use std::path::{Path, PathBuf};

use aha_core::deletion::{DeleteOutcome, DeletionTimings};
use aha_core::router::View;
use aha_core::{AccentColor, Session};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::{CompletionShell, ExportFormat, SettingsCommands, ThemeChoice};
use crate::commands::add::run_add;
use crate::commands::common::{
    default_editor, format_note_lines, format_relative_time, normalize_content,
    normalize_note_identifier, normalize_search_query, note_preview, resolve_note,
};
use crate::commands::completions::{completion_script, run_completions};
use crate::commands::config::set_db_path;
use crate::commands::delete::run_delete;
use crate::commands::details::run_details;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::reset::{run_clear, run_reset};
use crate::commands::search::run_search;
use crate::commands::settings::{format_palette, run_settings, theme_label};
use crate::commands::show::run_show;
use crate::config::{greet_first_run, open_session, CliConfig};
use crate::error::CliError;

const SNAPSHOT: &str = r#"[
  {"id":"abc-111","gist":"Ship the beta","details":"after the demo","createdAt":"2024-03-01T09:00:00Z","updatedAt":"2024-03-01T09:00:00Z"},
  {"id":"abc-222","gist":"Call the printer","details":"","createdAt":"2024-03-02T09:00:00Z","updatedAt":"2024-03-02T09:00:00Z"},
  {"id":"xyz-333","gist":"Beta testers want dark mode","details":"","createdAt":"2024-03-03T09:00:00Z","updatedAt":"2024-03-03T09:00:00Z"}
]"#;

const INSTANT: DeletionTimings = DeletionTimings {
    commit_delay_ms: 0,
    exit_animation_ms: 0,
    stagger_ms: 0,
    clear_buffer_ms: 0,
};

fn test_db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("aha.db")
}

fn open_test_session(dir: &TempDir) -> Session {
    open_session(&test_db_path(dir), INSTANT).unwrap()
}

fn seeded_session(dir: &TempDir) -> Session {
    let mut session = open_test_session(dir);
    session.import(SNAPSHOT).unwrap();
    session
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn normalize_search_query_rejects_empty() {
    assert_eq!(normalize_search_query(" beta ").unwrap(), "beta");
    assert!(matches!(
        normalize_search_query("   "),
        Err(CliError::EmptySearchQuery)
    ));
}

#[test]
fn normalize_note_identifier_rejects_empty() {
    assert_eq!(normalize_note_identifier(" abc ").unwrap(), "abc");
    assert!(matches!(
        normalize_note_identifier(""),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
}

#[test]
fn note_preview_truncates_with_ellipsis() {
    let note = aha_core::Note::new("one   two\nthree four five six");
    assert_eq!(note_preview(&note, 40), "one two three four five six");
    assert_eq!(note_preview(&note, 10), "one two...");
}

#[test]
fn format_note_lines_flag_notes_with_details() {
    let plain = aha_core::Note::new("plain");
    let detailed = aha_core::Note::new("detailed").with_details("more");

    let lines = format_note_lines(&[plain, detailed]);

    assert!(!lines[0].contains("+details"));
    assert!(lines[1].ends_with("+details"));
}

#[test]
fn run_add_persists_gist_and_optional_details() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);

    let quick = run_add(&mut session, &words("a quick  insight"), None).unwrap();
    let full = run_add(&mut session, &words("with context"), Some("  the why  ")).unwrap();

    assert_eq!(quick.gist, "a quick insight");
    assert_eq!(quick.details, "");
    assert_eq!(full.details, "the why");
    assert_eq!(session.view(), View::History);

    let reopened = open_test_session(&dir);
    assert_eq!(reopened.notes().len(), 2);
    assert_eq!(reopened.notes().notes()[0].gist, "with context");
}

#[test]
fn run_list_respects_limit_and_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let latest = run_list(&mut session, 2, None, false).unwrap();
    let gists = latest.iter().map(|note| note.gist.as_str()).collect::<Vec<_>>();
    assert_eq!(gists, vec!["Beta testers want dark mode", "Call the printer"]);

    let filtered = run_list(&mut session, 10, Some("BETA"), true).unwrap();
    assert_eq!(filtered.len(), 2);
    assert_eq!(session.view(), View::History);
}

#[test]
fn run_search_matches_details_and_rejects_blank_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let found = run_search(&mut session, "demo", 10, false).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_str(), "abc-111");

    assert!(matches!(
        run_search(&mut session, "  ", 10, false),
        Err(CliError::EmptySearchQuery)
    ));
}

#[test]
fn resolve_note_supports_exact_and_prefix_id() {
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&dir);

    assert_eq!(resolve_note("abc-222", &session).unwrap().gist, "Call the printer");
    assert_eq!(
        resolve_note("xyz", &session).unwrap().gist,
        "Beta testers want dark mode"
    );
}

#[test]
fn resolve_note_rejects_ambiguous_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&dir);

    let Err(CliError::AmbiguousNoteId(message)) = resolve_note("abc", &session) else {
        panic!("expected ambiguous prefix error");
    };
    assert!(message.contains("abc-111"));
    assert!(message.contains("abc-222"));
}

#[test]
fn resolve_note_rejects_missing_note() {
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&dir);

    assert!(matches!(
        resolve_note("nope", &session),
        Err(CliError::NoteNotFound(id)) if id == "nope"
    ));
}

#[test]
fn run_show_opens_note_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let note = run_show(&mut session, "abc-1", false).unwrap();

    assert_eq!(note.details, "after the demo");
    assert_eq!(session.view(), View::Detail);
    assert_eq!(session.current_note().map(|n| n.id.as_str()), Some("abc-111"));
}

#[test]
fn run_details_replaces_and_allows_clearing_details() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let updated = run_details(&mut session, "abc-222", Some("bring the invoice")).unwrap();
    assert_eq!(updated.details, "bring the invoice");
    assert!(updated.updated_at > updated.created_at);

    let cleared = run_details(&mut session, "abc-222", Some("")).unwrap();
    assert_eq!(cleared.details, "");

    let reopened = open_test_session(&dir);
    let id = "abc-222".parse().unwrap();
    assert_eq!(reopened.notes().get(&id).unwrap().details, "");
}

#[tokio::test(flavor = "current_thread")]
async fn run_delete_runs_sequence_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let outcome = run_delete(&mut session, "xyz", None).await.unwrap();

    assert!(matches!(outcome, DeleteOutcome::Scheduled { .. }));
    assert!(session.sequencer().is_idle());
    assert_eq!(session.pending_deletion(), None);
    assert_eq!(session.notes().len(), 2);
    assert_eq!(open_test_session(&dir).notes().len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn run_delete_outside_filtered_list_removes_directly() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    let outcome = run_delete(&mut session, "abc-222", Some("beta"))
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::RemovedDirectly { removed: true });
    assert!(session.sequencer().is_idle());
    assert_eq!(session.notes().len(), 2);
}

#[test]
fn run_export_writes_json_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&dir);

    let written = run_export(&session, ExportFormat::Json, Some(dir.path()))
        .unwrap()
        .unwrap();

    assert_eq!(written, dir.path().join("aha-notes.json"));
    let payload = std::fs::read_to_string(&written).unwrap();
    assert_eq!(aha_core::import::parse_import(&payload).unwrap().len(), 3);
}

#[test]
fn run_export_writes_markdown_to_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = seeded_session(&dir);
    let target = dir.path().join("notes.md");

    run_export(&session, ExportFormat::Markdown, Some(&target)).unwrap();

    let rendered = std::fs::read_to_string(&target).unwrap();
    assert!(rendered.contains("# Ship the beta"));
    assert!(rendered.contains("id: xyz-333"));
}

#[test]
fn run_export_skips_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_test_session(&dir);

    let written = run_export(&session, ExportFormat::Json, Some(dir.path())).unwrap();

    assert_eq!(written, None);
    assert!(!dir.path().join("aha-notes.json").exists());
}

#[test]
fn run_import_replaces_notes_and_rejects_bad_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);
    run_add(&mut session, &words("will be replaced"), None).unwrap();

    let snapshot = dir.path().join("snapshot.json");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();
    assert_eq!(run_import(&mut session, &snapshot).unwrap(), 3);
    assert!(session.notes().notes().iter().all(|n| n.gist != "will be replaced"));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"notes":[]}"#).unwrap();
    assert!(matches!(
        run_import(&mut session, &bad),
        Err(CliError::Import(_))
    ));
    assert_eq!(session.notes().len(), 3);
}

#[test]
fn run_import_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);

    assert!(matches!(
        run_import(&mut session, Path::new("/definitely/not/here.json")),
        Err(CliError::Io(_))
    ));
}

#[test]
fn run_settings_changes_theme_and_accent() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);
    assert!(session.preferences().dark_mode);

    let light = run_settings(
        &mut session,
        Some(SettingsCommands::Theme {
            mode: ThemeChoice::Toggle,
        }),
    )
    .unwrap();
    assert!(!light.dark_mode);

    let teal = run_settings(
        &mut session,
        Some(SettingsCommands::Accent {
            key: Some("Teal".to_string()),
        }),
    )
    .unwrap();
    assert_eq!(teal.accent, AccentColor::Teal);
    assert_eq!(session.view(), View::Settings);

    let reopened = open_test_session(&dir);
    assert!(!reopened.preferences().dark_mode);
    assert_eq!(reopened.preferences().accent, AccentColor::Teal);
}

#[test]
fn run_settings_rejects_unknown_accent() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);

    let result = run_settings(
        &mut session,
        Some(SettingsCommands::Accent {
            key: Some("mauve".to_string()),
        }),
    );

    assert!(matches!(result, Err(CliError::Core(_))));
    assert_eq!(session.preferences().accent, AccentColor::Blue);
}

#[test]
fn palette_marks_current_accent() {
    let lines = format_palette(AccentColor::Green);
    assert_eq!(lines.len(), AccentColor::ALL.len());
    assert!(lines[1].starts_with("* green"));
    assert!(lines[0].starts_with("  blue"));
    assert_eq!(theme_label(true), "dark");
}

#[test]
fn clear_and_reset_require_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);

    assert!(matches!(
        run_clear(&mut session, false),
        Err(CliError::ConfirmationRequired(_))
    ));
    assert!(matches!(
        run_reset(&mut session, false),
        Err(CliError::ConfirmationRequired(_))
    ));
    assert_eq!(session.notes().len(), 3);
}

#[test]
fn clear_keeps_preferences_but_reset_wipes_them() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = seeded_session(&dir);
    session.set_accent(AccentColor::Pink).unwrap();

    run_clear(&mut session, true).unwrap();
    assert!(session.notes().is_empty());
    assert_eq!(session.preferences().accent, AccentColor::Pink);

    run_reset(&mut session, true).unwrap();
    assert_eq!(session.preferences().accent, AccentColor::Blue);
    assert!(session.show_welcome());
}

#[test]
fn first_run_greeting_is_shown_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_test_session(&dir);
    assert!(session.show_welcome());

    greet_first_run(&mut session).unwrap();

    assert!(!session.show_welcome());
    assert!(!open_test_session(&dir).show_welcome());
}

#[test]
fn set_db_path_persists_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config").join("cli-config.json");
    let db_path = dir.path().join("elsewhere.db");

    let saved = set_db_path(&CliConfig::default(), &db_path, &config_path).unwrap();

    assert_eq!(saved.db_path.as_deref(), Some(db_path.as_path()));
    assert_eq!(saved.version, 1);
    assert_eq!(CliConfig::load_from_path(&config_path).unwrap(), saved);
}

#[test]
fn completion_scripts_mention_binary_name() {
    for shell in [CompletionShell::Bash, CompletionShell::Zsh, CompletionShell::Fish] {
        let script = String::from_utf8(completion_script(shell)).unwrap();
        assert!(script.contains("aha"));
    }
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("aha.bash");

    run_completions(CompletionShell::Bash, Some(&output)).unwrap();

    let script = std::fs::read_to_string(&output).unwrap();
    assert!(script.contains("_aha()"));
}
