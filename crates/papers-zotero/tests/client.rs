use papers_zotero::{ItemListParams, LibraryType, ZoteroClient, ZoteroError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_client(mock: &MockServer) -> ZoteroClient {
    ZoteroClient::new("42", "test-key").with_base_url(mock.uri())
}

fn item_json(key: &str, title: &str) -> String {
    format!(
        r#"{{"key":"{key}","version":1,"meta":{{"numChildren":1}},"data":{{"key":"{key}","itemType":"journalArticle","title":"{title}","creators":[]}}}}"#
    )
}

fn items_json(keys: std::ops::Range<usize>) -> String {
    let items: Vec<String> = keys
        .map(|i| item_json(&format!("K{i:07}"), &format!("Paper {i}")))
        .collect();
    format!("[{}]", items.join(","))
}

#[tokio::test]
async fn sends_auth_and_version_headers() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/current"))
        .and(header("Zotero-API-Key", "test-key"))
        .and(header("Zotero-API-Version", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"key":"test-key","userID":42}"#))
        .expect(1)
        .mount(&mock)
        .await;

    let info = make_client(&mock).get_key_info().await.unwrap();
    assert_eq!(info["userID"], 42);
}

#[tokio::test]
async fn invalid_key_is_api_error() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/current"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid key"))
        .mount(&mock)
        .await;

    let err = make_client(&mock).get_key_info().await.unwrap_err();
    match err {
        ZoteroError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn group_library_uses_groups_prefix() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/42/collections/COLL0001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"key":"COLL0001","version":3,"meta":{"numItems":2},"data":{"key":"COLL0001","name":"Reading list","parentCollection":false}}"#,
        ))
        .mount(&mock)
        .await;

    let coll = make_client(&mock)
        .with_library_type(LibraryType::Group)
        .get_collection("COLL0001")
        .await
        .unwrap();
    assert_eq!(coll.data.name, "Reading list");
    assert_eq!(coll.meta.num_items, Some(2));
}

#[tokio::test]
async fn list_top_items_reads_total_results() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/collections/COLL0001/items/top"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "7")
                .set_body_string(items_json(0..2)),
        )
        .mount(&mock)
        .await;

    let resp = make_client(&mock)
        .list_collection_top_items("COLL0001", &ItemListParams::builder().limit(2).build())
        .await
        .unwrap();
    assert_eq!(resp.total_results, Some(7));
    assert_eq!(resp.items.len(), 2);
    assert_eq!(resp.items[1].data.title.as_deref(), Some("Paper 1"));
}

#[tokio::test]
async fn all_top_items_pages_until_total() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/collections/COLL0001/items/top"))
        .and(query_param("start", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "130")
                .set_body_string(items_json(0..100)),
        )
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/42/collections/COLL0001/items/top"))
        .and(query_param("start", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "130")
                .set_body_string(items_json(100..130)),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let items = make_client(&mock)
        .all_collection_top_items("COLL0001")
        .await
        .unwrap();
    assert_eq!(items.len(), 130);
    assert_eq!(items[0].key, "K0000000");
    assert_eq!(items[129].key, "K0000129");
}

#[tokio::test]
async fn all_top_items_of_empty_collection() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/collections/EMPTY001/items/top"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "0")
                .set_body_string("[]"),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let items = make_client(&mock)
        .all_collection_top_items("EMPTY001")
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn fulltext_present() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/items/PDF00001/fulltext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"content":"Body text","indexedPages":3,"totalPages":3}"#,
        ))
        .mount(&mock)
        .await;

    let text = make_client(&mock)
        .get_item_fulltext("PDF00001")
        .await
        .unwrap()
        .expect("fulltext");
    assert_eq!(text.content, "Body text");
    assert_eq!(text.indexed_pages, Some(3));
}

#[tokio::test]
async fn fulltext_missing_is_none() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/items/PDF00002/fulltext"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock)
        .await;

    let text = make_client(&mock).get_item_fulltext("PDF00002").await.unwrap();
    assert!(text.is_none());
}

#[tokio::test]
async fn fulltext_server_error_propagates() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/items/PDF00003/fulltext"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let err = make_client(&mock)
        .get_item_fulltext("PDF00003")
        .await
        .unwrap_err();
    assert!(matches!(err, ZoteroError::Api { status: 500, .. }));
}
