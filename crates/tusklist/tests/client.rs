use std::collections::VecDeque;
use std::sync::Arc;

use http::{Method, StatusCode};
use tokio::sync::Mutex;
use tusklist::client::{AuthError, ClientError, MastodonClient, PageRange};
use tusklist::http_client::HttpClient;
use tusklist::relations::{
    FetchOutcome, FetchPhase, ListError, RelationshipKind, RelationshipList, RelationshipSource,
};
use tusklist::url::Url;
use tusklist::AccountId;

#[derive(Debug, Clone, Default)]
struct MockClient {
    queue: Arc<Mutex<VecDeque<http::Response<Vec<u8>>>>>,
    log: Arc<Mutex<Vec<http::Request<Vec<u8>>>>>,
}

impl MockClient {
    async fn push(&self, resp: http::Response<Vec<u8>>) {
        self.queue.lock().await.push_back(resp);
    }

    async fn push_json(&self, value: serde_json::Value) {
        self.push(response(StatusCode::OK, serde_json::to_vec(&value).unwrap()))
            .await;
    }

    async fn requests(&self) -> Vec<(Method, String, Option<String>)> {
        self.log
            .lock()
            .await
            .iter()
            .map(|req| {
                let auth = req
                    .headers()
                    .get(http::header::AUTHORIZATION)
                    .map(|v| v.to_str().unwrap().to_string());
                (req.method().clone(), req.uri().to_string(), auth)
            })
            .collect()
    }
}

impl HttpClient for MockClient {
    type Error = std::convert::Infallible;
    fn send_http(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl core::future::Future<
        Output = core::result::Result<http::Response<Vec<u8>>, Self::Error>,
    > + Send {
        let log = self.log.clone();
        let queue = self.queue.clone();
        async move {
            log.lock().await.push(request);
            Ok(queue.lock().await.pop_front().expect("no queued response"))
        }
    }
}

fn response(status: StatusCode, body: Vec<u8>) -> http::Response<Vec<u8>> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

fn accounts(ids: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "username": format!("user{id}"),
                    "acct": format!("user{id}"),
                    "display_name": "",
                    "locked": false,
                    "bot": false,
                    "followers_count": 3,
                    "following_count": 4,
                    "statuses_count": 5,
                })
            })
            .collect(),
    )
}

fn relationship(id: &str, blocking: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "following": false,
        "followed_by": false,
        "blocking": blocking,
        "muting": false,
        "requested": false,
        "domain_blocking": false,
        "showing_reblogs": false,
        "notifying": false,
        "endorsed": false,
    })
}

fn client(mock: &MockClient) -> MastodonClient<MockClient> {
    MastodonClient::new(mock.clone(), Url::parse("https://social.example").unwrap())
        .with_token("secret")
}

fn id(id: &'static str) -> AccountId {
    AccountId::new_static(id).unwrap()
}

#[tokio::test]
async fn list_endpoints_use_expected_paths() {
    let mock = MockClient::default();
    for _ in 0..4 {
        mock.push_json(accounts(&[])).await;
    }
    let client = client(&mock);
    let range = PageRange::default();

    client.account_following(&id("42"), &range).await.unwrap();
    client.account_followers(&id("42"), &range).await.unwrap();
    client.blocks(&range).await.unwrap();
    client.mutes(&range).await.unwrap();

    let uris: Vec<_> = mock
        .requests()
        .await
        .into_iter()
        .map(|(method, uri, _)| {
            assert_eq!(method, Method::GET);
            uri
        })
        .collect();
    assert_eq!(
        uris,
        [
            "https://social.example/api/v1/accounts/42/following",
            "https://social.example/api/v1/accounts/42/followers",
            "https://social.example/api/v1/blocks",
            "https://social.example/api/v1/mutes",
        ]
    );
}

#[tokio::test]
async fn sends_cursor_and_bearer_token() {
    let mock = MockClient::default();
    mock.push_json(accounts(&["7", "6"])).await;
    let client = client(&mock);

    let page = client
        .blocks(&PageRange::before(Some(&id("8"))))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id.as_str(), "7");
    assert_eq!(page[0].followers_count, 3);

    let requests = mock.requests().await;
    assert_eq!(requests[0].1, "https://social.example/api/v1/blocks?max_id=8");
    assert_eq!(requests[0].2.as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn base_path_is_kept() {
    let mock = MockClient::default();
    mock.push_json(accounts(&[])).await;
    let client = MastodonClient::new(
        mock.clone(),
        Url::parse("https://example.org/masto").unwrap(),
    );

    client.mutes(&PageRange::default()).await.unwrap();
    let requests = mock.requests().await;
    assert_eq!(requests[0].1, "https://example.org/masto/api/v1/mutes");
    assert_eq!(requests[0].2, None);
}

#[tokio::test]
async fn block_and_unblock_post_to_account() {
    let mock = MockClient::default();
    mock.push_json(relationship("99", true)).await;
    mock.push_json(relationship("99", false)).await;
    let client = client(&mock);

    assert!(client.block_account(&id("99")).await.unwrap().blocking);
    assert!(!client.unblock_account(&id("99")).await.unwrap().blocking);

    let requests = mock.requests().await;
    assert_eq!(requests[0].0, Method::POST);
    assert_eq!(requests[0].1, "https://social.example/api/v1/accounts/99/block");
    assert_eq!(requests[1].0, Method::POST);
    assert_eq!(requests[1].1, "https://social.example/api/v1/accounts/99/unblock");
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let mock = MockClient::default();
    let body = br#"{"error":"The access token is invalid"}"#.to_vec();
    mock.push(response(StatusCode::UNAUTHORIZED, body.clone()))
        .await;
    mock.push(response(StatusCode::UNAUTHORIZED, body)).await;

    let err = client(&mock).mutes(&PageRange::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthError::InvalidToken)));

    let anonymous = MastodonClient::new(mock.clone(), Url::parse("https://social.example").unwrap());
    let err = anonymous.mutes(&PageRange::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn error_status_keeps_server_message() {
    let mock = MockClient::default();
    mock.push(response(
        StatusCode::NOT_FOUND,
        br#"{"error":"Record not found"}"#.to_vec(),
    ))
    .await;

    let err = client(&mock)
        .account_followers(&id("404"), &PageRange::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Http(http) => {
            assert_eq!(http.status, StatusCode::NOT_FOUND);
            assert_eq!(http.api_message().as_deref(), Some("Record not found"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mock = MockClient::default();
    mock.push(response(StatusCode::OK, b"<html>".to_vec())).await;

    let err = client(&mock).blocks(&PageRange::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn follows_list_requires_account() {
    let client = Arc::new(client(&MockClient::default()));
    let err = RelationshipSource::new(client.clone(), RelationshipKind::Follows, None).unwrap_err();
    assert!(matches!(
        err,
        ListError::MissingAccount {
            kind: RelationshipKind::Follows
        }
    ));

    // blocks and mutes ignore the account
    let source = RelationshipSource::new(client, RelationshipKind::Blocks, Some(id("1"))).unwrap();
    assert_eq!(source.kind(), RelationshipKind::Blocks);
}

#[tokio::test]
async fn list_pages_through_followers() {
    let mock = MockClient::default();
    mock.push_json(accounts(&["A", "B", "C"])).await;
    mock.push_json(accounts(&["D", "E"])).await;
    mock.push_json(accounts(&[])).await;

    let list = RelationshipList::from_client(
        Arc::new(client(&mock)),
        RelationshipKind::Followers,
        Some(id("42")),
    )
    .unwrap();

    assert_eq!(list.refresh().await.unwrap(), FetchOutcome::Replaced(3));
    assert_eq!(list.load_more().await.unwrap(), FetchOutcome::Appended(2));
    assert_eq!(list.load_more().await.unwrap(), FetchOutcome::EndOfData);
    assert_eq!(list.phase(), FetchPhase::EndOfData);
    assert_eq!(list.entries().len(), 5);

    let uris: Vec<_> = mock.requests().await.into_iter().map(|r| r.1).collect();
    assert_eq!(
        uris,
        [
            "https://social.example/api/v1/accounts/42/followers",
            "https://social.example/api/v1/accounts/42/followers?max_id=C",
            "https://social.example/api/v1/accounts/42/followers?max_id=E",
        ]
    );
}

#[tokio::test]
async fn block_toggle_round_trips_through_client() {
    let mock = MockClient::default();
    mock.push_json(accounts(&["97", "98", "99"])).await;
    mock.push_json(relationship("99", false)).await;
    mock.push(response(
        StatusCode::INTERNAL_SERVER_ERROR,
        br#"{"error":"boom"}"#.to_vec(),
    ))
    .await;

    let list = RelationshipList::from_client(Arc::new(client(&mock)), RelationshipKind::Blocks, None)
        .unwrap();
    list.refresh().await.unwrap();
    assert!(list.entries()[2].blocked);

    let relationship = list.toggle_block(id("99"), false, 2).await.unwrap();
    assert!(!relationship.blocking);
    assert!(!list.entries()[2].blocked);

    let err = list.toggle_block(id("99"), true, 2).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to block account id 99");
    assert!(!list.entries()[2].blocked);

    let requests = mock.requests().await;
    assert_eq!(requests[1].1, "https://social.example/api/v1/accounts/99/unblock");
    assert_eq!(requests[2].1, "https://social.example/api/v1/accounts/99/block");
}

#[tokio::test]
async fn server_ids_outside_the_input_charset_are_kept() {
    let mock = MockClient::default();
    mock.push_json(accounts(&["1", "abc.def", "a/b"])).await;
    mock.push_json(accounts(&[])).await;
    mock.push_json(relationship("a/b", true)).await;

    let list = RelationshipList::from_client(Arc::new(client(&mock)), RelationshipKind::Mutes, None)
        .unwrap();
    assert_eq!(list.refresh().await.unwrap(), FetchOutcome::Replaced(3));
    assert_eq!(list.phase(), FetchPhase::Loading);

    let last = list.entries()[2].account.id.clone();
    assert_eq!(last.as_str(), "a/b");
    assert_eq!(list.load_more().await.unwrap(), FetchOutcome::EndOfData);
    list.toggle_block(last, true, 2).await.unwrap();
    assert!(list.entries()[2].blocked);

    let uris: Vec<_> = mock.requests().await.into_iter().map(|r| r.1).collect();
    assert_eq!(
        uris,
        [
            "https://social.example/api/v1/mutes",
            "https://social.example/api/v1/mutes?max_id=a%2Fb",
            "https://social.example/api/v1/accounts/a%2Fb/block",
        ]
    );
}
