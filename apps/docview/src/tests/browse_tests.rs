use super::*;

use async_trait::async_trait;
use client_core::ClientError;
use shared::{
    domain::{Document, DocumentId, ImportSummary},
    query::QueryParams,
};

struct CategoryEchoApi;

fn doc(id: i64, title: &str, category: Category) -> Document {
    Document {
        id: DocumentId(id),
        title: title.to_string(),
        description: None,
        responsible_unit: "Archive".to_string(),
        created_at: NaiveDate::from_ymd_opt(2022, 8, 30).expect("date"),
        url: format!("https://docs.example.test/{id}"),
        file_type: "pdf".to_string(),
        reading_time_minutes: 2,
        importance: Importance::Low,
        category,
        active: true,
    }
}

#[async_trait]
impl DocumentsApi for CategoryEchoApi {
    async fn list_documents(&self, params: &QueryParams) -> Result<Vec<Document>, ClientError> {
        match params.get("category") {
            Some("internal") => Ok(vec![doc(2, "Internal memo", Category::Internal)]),
            Some(_) => Err(ClientError::Fetch {
                status: 400,
                detail: Some("unsupported category".to_string()),
            }),
            None => Ok(vec![
                doc(1, "Public notice", Category::Public),
                doc(2, "Internal memo", Category::Internal),
            ]),
        }
    }

    async fn import_documents(&self) -> Result<ImportSummary, ClientError> {
        Ok(ImportSummary { imported: 2 })
    }
}

async fn run_script(script: &str) -> String {
    let mut output = Vec::new();
    run(Arc::new(CategoryEchoApi), script.as_bytes(), &mut output)
        .await
        .expect("session");
    String::from_utf8(output).expect("utf8 output")
}

#[test]
fn parses_filter_commands() {
    assert_eq!(
        parse_command("category Internal"),
        Ok(BrowseCommand::Event(ViewEvent::SetCategory(Some(
            Category::Internal
        ))))
    );
    assert_eq!(
        parse_command("category all"),
        Ok(BrowseCommand::Event(ViewEvent::SetCategory(None)))
    );
    assert_eq!(
        parse_command("active no"),
        Ok(BrowseCommand::Event(ViewEvent::SetActive(Some(false))))
    );
    assert_eq!(
        parse_command("importance critical"),
        Ok(BrowseCommand::Event(ViewEvent::SetImportance(Some(
            Importance::Critical
        ))))
    );
    assert_eq!(
        parse_command("sort title"),
        Ok(BrowseCommand::Event(ViewEvent::SetSortField(SortField::Title)))
    );
    assert_eq!(
        parse_command("from 2024-01-31"),
        Ok(BrowseCommand::Event(ViewEvent::SetCreatedFrom(
            NaiveDate::from_ymd_opt(2024, 1, 31)
        )))
    );
    assert_eq!(
        parse_command("to none"),
        Ok(BrowseCommand::Event(ViewEvent::SetCreatedTo(None)))
    );
    assert_eq!(
        parse_command("toggle"),
        Ok(BrowseCommand::Event(ViewEvent::ToggleSortOrder))
    );
    assert_eq!(
        parse_command("import"),
        Ok(BrowseCommand::Event(ViewEvent::ImportRequested))
    );
}

#[test]
fn parses_session_commands() {
    assert_eq!(parse_command("  "), Ok(BrowseCommand::Show));
    assert_eq!(parse_command("quit"), Ok(BrowseCommand::Quit));
    assert_eq!(parse_command("help"), Ok(BrowseCommand::Help));
}

#[test]
fn rejects_bad_input() {
    assert!(parse_command("category").is_err());
    assert!(parse_command("category secret").is_err());
    assert!(parse_command("from 31.01.2024").is_err());
    assert!(parse_command("active maybe").is_err());
    assert!(parse_command("sort title asc").is_err());
    let err = parse_command("frobnicate").expect_err("unknown");
    assert!(err.contains("unknown command"));
}

#[tokio::test]
async fn end_of_input_waits_for_initial_load() {
    let output = run_script("").await;

    assert!(output.starts_with("[loading…] sort=created_at desc | 0 documents"));
    assert!(output.contains("Public notice"));
    assert!(output
        .trim_end()
        .ends_with("[idle] sort=created_at desc | 2 documents"));
}

#[tokio::test]
async fn latest_filter_wins_after_concurrent_loads() {
    let output = run_script("category internal\n").await;

    assert!(output
        .trim_end()
        .ends_with("[idle] category=internal sort=created_at desc | 1 documents"));
    let final_table = output.rsplit("Title").next().expect("table");
    assert!(final_table.contains("Internal memo"));
    assert!(!final_table.contains("Public notice"));
}

#[tokio::test]
async fn failed_load_reports_error_with_detail() {
    let output = run_script("category restricted\n").await;

    assert!(output.contains("error: HTTP 400 (unsupported category)"));
}

#[tokio::test]
async fn quit_stops_without_waiting() {
    let output = run_script("quit\nrefresh\n").await;

    assert_eq!(output, "[loading…] sort=created_at desc | 0 documents\n");
}

#[tokio::test]
async fn unknown_commands_are_reported_and_session_continues() {
    let output = run_script("bogus\nhelp\n").await;

    assert!(output.contains("unknown command 'bogus'"));
    assert!(output.contains("commands:"));
}
