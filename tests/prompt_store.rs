use std::fs;
use std::path::Path;
use std::sync::Arc;

use prompt_mcp_server::core::config::PromptsConfig;
use prompt_mcp_server::domains::prompts::{
    FilePromptStore, PromptError, PromptService, PromptSource, SearchOutcome,
};
use prompt_mcp_server::domains::resources::ResourceService;
use rmcp::model::PromptMessageContent;
use serde_json::json;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn service_for(root: &Path) -> PromptService {
    PromptService::new(&PromptsConfig {
        directory: root.to_path_buf(),
    })
}

#[tokio::test]
async fn test_render_from_template_alias() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", r#"{"id":"x","template":"Hi {{who}}"}"#);

    let variables = json!({ "who": "Bob" }).as_object().cloned().unwrap();
    let text = service_for(tmp.path())
        .render_prompt("x", Some(&variables))
        .await
        .unwrap();

    assert_eq!(text, "Hi Bob");
}

#[tokio::test]
async fn test_mustache_sections_render_through_service() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "s.json",
        r#"{"id":"s","prompt":"A{{#flag}}[on {{who}}]{{/flag}}{{^flag}}off{{/flag}}{{#items}}<{{name}}>{{/items}}B"}"#,
    );
    let service = service_for(tmp.path());

    let variables = json!({ "flag": true, "who": "Bob", "items": [{ "name": "x" }, { "name": "y" }] })
        .as_object()
        .cloned()
        .unwrap();
    let text = service.render_prompt("s", Some(&variables)).await.unwrap();
    assert_eq!(text, "A[on Bob]<x><y>B");

    let result = service.get_prompt("s", None).await.unwrap();
    match &result.messages[0].content {
        PromptMessageContent::Text { text } => assert_eq!(text, "AoffB"),
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn test_array_file_yields_one_record_per_entry() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "b.json",
        r#"[{"title":"p1","prompt":"A"},{"title":"p2","prompt":"B"}]"#,
    );

    let records = FilePromptStore::new(tmp.path()).load_all().await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.identifier()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_missing_prompt_carries_id() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", r#"{"id":"x","prompt":"p"}"#);

    let err = FilePromptStore::new(tmp.path())
        .find_by_id("missing")
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::NotFound { .. }));
    assert_eq!(err.to_record().details.unwrap()["promptId"], "missing");
}

#[tokio::test]
async fn test_invalid_file_fails_every_operation() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "good.json", r#"{"id":"ok","prompt":"fine"}"#);
    write(tmp.path(), "deep/er/bad.json", r#"{"description":"nothing else"}"#);

    let service = service_for(tmp.path());
    let err = service.search_prompts("fine").await.unwrap_err();
    match err {
        PromptError::Format { path, .. } => assert!(path.ends_with("deep/er/bad.json")),
        other => panic!("unexpected error: {other:?}"),
    }

    let resources = ResourceService::new(service.source());
    assert!(matches!(
        resources.list_resources().await,
        Err(PromptError::Format { .. })
    ));
}

#[tokio::test]
async fn test_search_summary_counts_full_store() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "react/a.json", r#"{"id":"react/a","prompt":"A"}"#);
    write(
        tmp.path(),
        "api/b.json",
        r#"[{"id":"api/b","prompt":"B"},{"id":"api/c","prompt":"C"}]"#,
    );

    let outcome = service_for(tmp.path()).search_prompts("").await.unwrap();
    let SearchOutcome::Summary(summary) = outcome else {
        panic!("expected summary");
    };
    assert_eq!(summary.total_prompts, 3);
    assert_eq!(summary.categories, vec!["api", "react"]);
}

#[tokio::test]
async fn test_resources_and_prompts_share_store() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "a.json",
        r#"{"id":"x","name":"Greeting","description":"Greets","prompt":"Hello {{name}}"}"#,
    );

    let service = Arc::new(service_for(tmp.path()));
    let resources = ResourceService::new(service.source());

    let listed = resources.list_resources().await.unwrap();
    assert_eq!(listed[0].raw.uri, "prompt:///x");

    let read = resources.read_resource("prompt:///Greeting").await.unwrap();
    assert_eq!(read.contents.len(), 1);

    let prompts = service.list_prompts().await.unwrap();
    assert_eq!(prompts[0].name, "x");
}

#[tokio::test]
async fn test_packaged_prompts_are_valid() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts");
    let records = FilePromptStore::new(&root).load_all().await.unwrap();

    assert!(!records.is_empty());
    for record in &records {
        assert!(!record.identifier().is_empty());
        assert!(!record.body().is_empty());
    }

    let service = PromptService::new(&PromptsConfig { directory: root });
    let with_props = json!({ "name": "Card", "props": ["title", "body"] })
        .as_object()
        .cloned()
        .unwrap();
    let text = service
        .render_prompt("react/component", Some(&with_props))
        .await
        .unwrap();
    assert!(text.contains("prop `title`"));
    assert!(!text.contains("no props"));

    let bare = json!({ "name": "Spacer" }).as_object().cloned().unwrap();
    let text = service
        .render_prompt("react/component", Some(&bare))
        .await
        .unwrap();
    assert!(text.contains("It takes no props."));
}
