//! Tests for the demo collaborators and line protocol

use super::*;

#[test]
fn test_parse_plain_text_is_change() {
    assert_eq!(parse_command("bank"), Command::Change("bank".to_string()));
    assert_eq!(parse_command(""), Command::Change(String::new()));
}

#[test]
fn test_parse_submit_forms() {
    assert_eq!(parse_command("!"), Command::Submit);
    assert_eq!(parse_command(":submit"), Command::Submit);
}

#[test]
fn test_parse_indexed_commands() {
    assert_eq!(parse_command(":select 2"), Command::Select(2));
    assert_eq!(parse_command(":highlight 0"), Command::Highlight(Some(0)));
    assert_eq!(parse_command(":highlight"), Command::Highlight(None));
    assert_eq!(
        parse_command(":select two"),
        Command::Unknown(":select two".to_string())
    );
}

#[test]
fn test_parse_panel_commands() {
    assert_eq!(parse_command(":focus"), Command::Focus);
    assert_eq!(parse_command(":close"), Command::Close);
    assert_eq!(parse_command(":open"), Command::Open);
    assert_eq!(parse_command(":clear-recent"), Command::ClearRecent);
    assert_eq!(parse_command(":q"), Command::Quit);
    assert_eq!(parse_command(":bogus"), Command::Unknown(":bogus".to_string()));
}

#[test]
fn test_corpus_prefix_matches_first() {
    let client = CorpusSearchClient::new(default_corpus(), Duration::ZERO);
    let values: Vec<String> = client
        .matches("ban", &SearchContext::Universal)
        .into_iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec!["bank hours", "bank holidays", "banking app"]);

    let values: Vec<String> = client
        .matches("account", &SearchContext::Universal)
        .into_iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec!["savings account"]);
}

#[test]
fn test_corpus_respects_vertical_context() {
    let client = CorpusSearchClient::new(default_corpus(), Duration::ZERO);
    let values: Vec<String> = client
        .matches("credit", &SearchContext::Vertical("faqs".to_string()))
        .into_iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec!["credit score"]);
}

#[test]
fn test_corpus_from_json() {
    let json = r#"[{"value": "pizza", "vertical_keys": ["restaurants"]}, {"value": "pasta"}]"#;
    let client = CorpusSearchClient::from_json(json, Duration::ZERO).unwrap();
    assert_eq!(client.matches("p", &SearchContext::Universal).len(), 2);
}

#[test]
fn test_corpus_from_invalid_json() {
    let result = CorpusSearchClient::from_json("{not json", Duration::ZERO);
    assert!(matches!(result, Err(SearchBarError::Json(_))));
}

#[tokio::test]
async fn test_fixed_geolocation_unavailable_without_location() {
    let geolocation = FixedGeolocation::new(None);
    let result = geolocation.locate(&GeolocationOptions::default()).await;
    assert!(matches!(result, Err(GeolocationError::Unavailable(_))));
}

#[test]
fn test_recording_router_take_drains() {
    let router = RecordingRouter::default();
    router.navigate(
        "/faqs?query=bank",
        NavigationState {
            query: "bank".to_string(),
        },
    );
    assert_eq!(router.take(), vec!["/faqs?query=bank"]);
    assert!(router.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_render_panel_lists_rows_and_announcement() {
    use crate::config::SearchBarConfig;
    use crate::test_utils::test_helpers::controller_fixture;

    let mut f = controller_fixture(SearchBarConfig::default());
    f.controller.on_change("bank h");
    f.controller.settle().await;
    f.controller.on_highlight(Some(1));

    assert_eq!(
        render_panel(&f.controller),
        "> bank hours\n  0 suggest bank hours\n* 1   in locations -> /locations?query=bank hours\n  2   in faqs -> /faqs?query=bank hours\n(3 autocomplete suggestions found.)\n"
    );
}

#[test]
fn test_render_closed_panel_shows_input_only() {
    use crate::config::SearchBarConfig;
    use crate::test_utils::test_helpers::controller_fixture;

    let f = controller_fixture(SearchBarConfig::default());
    assert_eq!(render_panel(&f.controller), "> \n");
}
