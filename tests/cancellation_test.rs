//! Integration tests for cancellation
//!
//! These tests verify that:
//! - A cancelled run writes nothing after the cancellation point
//! - The open document is still closed
//! - Cancellation takes precedence over counted issues

mod common;

use common::{config_with_formats, manifest_host, CancellingHost, ScriptedInteraction};
use hub_exporter::adapters::manifest::ManifestHost;
use hub_exporter::core::cancel::CancellationToken;
use hub_exporter::core::export::{ExportSession, RunOutcome};
use hub_exporter::domain::ExportFormat;
use serde_json::json;
use tempfile::TempDir;

fn two_designs() -> ManifestHost {
    manifest_host(json!({
        "active_hub": "Hub",
        "hubs": [{
            "name": "Hub",
            "projects": [{
                "name": "P",
                "root": {
                    "files": [
                        {
                            "name": "First",
                            "design": {
                                "root": "First",
                                "components": {
                                    "First": {
                                        "sketches": [{"name": "A"}, {"name": "B"}],
                                        "bodies": [{"name": "Body"}],
                                        "fail_formats": ["igs"]
                                    }
                                }
                            }
                        },
                        {"name": "Second"}
                    ]
                }
            }]
        }]
    }))
}

#[test]
fn test_cancel_after_open_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    let mut host = CancellingHost::after_opens(two_designs(), token.clone(), 1);
    let config = config_with_formats(&ExportFormat::ALL);
    let mut interaction = ScriptedInteraction::new(temp.path());

    let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
    let summary = session.run().unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(interaction.last_message(), Some("Cancelled!"));
    assert_eq!(host.inner.journal().opened, vec!["First"]);
    assert_eq!(host.inner.journal().closed, vec!["First"]);
    assert!(host.inner.writes().is_empty());
    assert_eq!(host.inner.open_document_count(), 0);
}

#[test]
fn test_cancel_after_first_write_stops_the_walk() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    let mut host = CancellingHost::after_writes(two_designs(), token.clone(), 1);
    let config = config_with_formats(&ExportFormat::ALL);
    let mut interaction = ScriptedInteraction::new(temp.path());

    let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
    let summary = session.run().unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(host.inner.writes().len(), 1);
    assert_eq!(host.inner.journal().opened, vec!["First"]);
    assert_eq!(host.inner.journal().closed, vec!["First"]);
}

#[test]
fn test_cancellation_takes_precedence_over_issues() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    // Archive, STEP and STL succeed before the failing IGES export
    let mut host = CancellingHost::after_writes(two_designs(), token.clone(), 3);
    let config = config_with_formats(&ExportFormat::ALL);
    let mut interaction = ScriptedInteraction::new(temp.path());

    let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
    let summary = session.run().unwrap();

    assert_eq!(host.inner.writes().len(), 3);
    assert_eq!(summary.issue_count(), 0);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
}

#[test]
fn test_cancelled_after_issue_still_reports_cancelled() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    // The IGES failure is the fourth export call; the first sketch is the fourth write
    let mut host = CancellingHost::after_writes(two_designs(), token.clone(), 4);
    let config = config_with_formats(&ExportFormat::ALL);
    let mut interaction = ScriptedInteraction::new(temp.path());

    let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
    let summary = session.run().unwrap();

    assert_eq!(summary.issue_count(), 1);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(host.inner.writes().len(), 4);
    assert_eq!(host.inner.open_document_count(), 0);
}

#[test]
fn test_token_cancelled_before_run() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let mut host = two_designs();
    let config = config_with_formats(&ExportFormat::ALL);
    let mut interaction = ScriptedInteraction::new(temp.path());

    let mut session = ExportSession::new(&mut host, &mut interaction, &config, token);
    let summary = session.run().unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert!(host.journal().opened.is_empty());
    assert_eq!(summary.hubs_visited, 0);
}
