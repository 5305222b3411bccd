//! Tourism aggregator integration tests against a mocked upstream API.

use hansearch::category::Category;
use hansearch::config::Settings;
use hansearch::error::SearchError;
use hansearch::search::Search;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.tourism.base_url = server.uri();
    settings.tourism.service_key = "test-key".to_string();
    settings.outgoing.request_timeout = 2.0;
    settings
}

/// Filter node with (grouping code, leaf codes) children.
fn filter(groups: &[(&str, &[&str])]) -> Category {
    let item = groups
        .iter()
        .map(|(code, leaves)| {
            Category::with_items(
                *code,
                format!("group {code}"),
                leaves
                    .iter()
                    .map(|leaf| Category::new(*leaf, format!("leaf {leaf}")))
                    .collect(),
            )
        })
        .collect();
    Category::with_items("tourism", "관광지역", item)
}

fn body_with(items: &[(&str, &str)]) -> String {
    let entries: Vec<String> = items
        .iter()
        .map(|(contentid, title)| {
            format!(
                r#"{{"contentid": "{contentid}", "title": "{title}",
                    "addr1": "Seoul", "mapx": "126.98", "mapy": "37.52"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"response": {{"body": {{"items": {{"item": [{}]}}}}}}}}"#,
        entries.join(",")
    )
}

#[tokio::test]
async fn one_request_per_grouping_leaf_pair() {
    let server = MockServer::start().await;

    // 2 groupings x 2 leaves = 4 requests, keyword empty -> area listing
    for (group, leaf, contentid) in [
        ("areaCode", "1", "100"),
        ("areaCode", "2", "200"),
        ("lDongRegnCd", "11", "300"),
        ("lDongRegnCd", "26", "400"),
    ] {
        Mock::given(method("GET"))
            .and(path("/areaBasedSyncList2"))
            .and(query_param(group, leaf))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(body_with(&[(contentid, "Museum")])),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let items = search
        .search_tourism(
            &filter(&[("areaCode", &["1", "2"]), ("lDongRegnCd", &["11", "26"])]),
            "",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 4);
    let mut ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["100", "200", "300", "400"]);
}

#[tokio::test]
async fn keyword_selects_search_operation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searchKeyword2"))
        .and(query_param("keyword", "museum"))
        .and(query_param("serviceKey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body_with(&[("126508", "National Museum")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let items = search
        .search_tourism(
            &filter(&[("areaCode", &["1"])]),
            "museum",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "National Museum");
}

#[tokio::test]
async fn malformed_envelope_degrades_that_request_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/areaBasedSyncList2"))
        .and(query_param("areaCode", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/areaBasedSyncList2"))
        .and(query_param("areaCode", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_with(&[("200", "Museum")])))
        .mount(&server)
        .await;

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let items = search
        .search_tourism(
            &filter(&[("areaCode", &["1", "2"])]),
            "",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "200");
}

#[tokio::test]
async fn all_malformed_is_empty_not_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/areaBasedSyncList2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let items = search
        .search_tourism(
            &filter(&[("areaCode", &["1", "2"])]),
            "",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // parse failures are not transport faults
    assert!(items.is_empty());
}

#[tokio::test]
async fn total_transport_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/areaBasedSyncList2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let result = search
        .search_tourism(
            &filter(&[("areaCode", &["1", "2"])]),
            "",
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(SearchError::UpstreamUnavailable)));
}

#[tokio::test]
async fn duplicate_contentids_are_merged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/areaBasedSyncList2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_with(&[("100", "Museum")])))
        .mount(&server)
        .await;

    let search = Search::from_settings(settings_for(&server)).unwrap();
    let items = search
        .search_tourism(
            &filter(&[("areaCode", &["1", "2"])]),
            "",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "100");
}
