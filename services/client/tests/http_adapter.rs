//! Drives `HttpApiAdapter` against an in-process mock of the Bibliofind endpoints.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::post,
    Form, Json, Router,
};
use bibliofind_client::adapters::HttpApiAdapter;
use bibliofind_client::config::Config;
use bibliofind_core::controller::{FieldChange, SearchCompletion, SearchInteractionController};
use bibliofind_core::domain::{
    NotificationRequest, Outcome, SearchCriteria, SearchEndpoint, SearchFields, SearchMode,
    Timeframe,
};
use bibliofind_core::page::{Page, PageConfig, SeriesOption, RETRY_MESSAGE, SEARCH_LABEL};
use bibliofind_core::ports::{BibliofindApi, PortError, SystemClock};
use serde_json::{json, Value};

type Received = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

#[derive(Clone)]
struct Mock {
    received: Received,
    bodies: Arc<HashMap<&'static str, Value>>,
}

/// Records the form it received and answers with the canned body for the path.
async fn answer(
    State(mock): State<Mock>,
    uri: Uri,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let path = uri.path().to_string();
    let body = mock.bodies.get(path.as_str()).cloned().unwrap_or(Value::Null);
    mock.received.lock().unwrap().push((path, form));
    Json(body)
}

fn mock_router(received: Received) -> Router {
    let bodies = HashMap::from([
        (
            "/search.json",
            json!({ "status": "ok", "results": ["The Hobbit", "1937", "img.jpg"] }),
        ),
        (
            "/series-result.json",
            json!({
                "status": "ok",
                "results": [null, null, null],
                "most_recent": { "title": "Mort", "date": "1987", "cover_url": "mort.jpg" }
            }),
        ),
        ("/get-author-id.json", json!({ "auth_status": "ok", "id": 17 })),
        ("/get-series-id.json", json!({ "status": "Series not found" })),
        ("/update-fav-author.json", json!({ "result": "Tolkien added!" })),
        ("/email-info.json", json!({ "status": "Sent!" })),
    ]);
    let mock = Mock {
        received,
        bodies: Arc::new(bodies),
    };

    Router::new()
        .route("/search.json", post(answer))
        .route("/series-result.json", post(answer))
        .route("/get-author-id.json", post(answer))
        .route("/get-series-id.json", post(answer))
        .route("/update-fav-author.json", post(answer))
        .route("/email-info.json", post(answer))
        .route(
            "/update-fav-series.json",
            post(|| async { (StatusCode::UNAUTHORIZED, "login required") }),
        )
        .with_state(mock)
}

async fn start_server() -> (HttpApiAdapter, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let adapter = serve(mock_router(received.clone())).await;
    (adapter, received)
}

async fn serve(app: Router) -> HttpApiAdapter {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = format!("http://{}", addr);
    let config = Config::from_lookup(|key| match key {
        "BIBLIOFIND_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .unwrap();
    HttpApiAdapter::from_config(&config).unwrap()
}

fn form_of(received: &Received, endpoint: &str) -> HashMap<String, String> {
    received
        .lock()
        .unwrap()
        .iter()
        .find(|(name, _)| name == endpoint)
        .map(|(_, form)| form.clone())
        .unwrap_or_else(|| panic!("no request to {}", endpoint))
}

#[tokio::test]
async fn author_search_posts_form_and_parses_positional_results() {
    let (adapter, received) = start_server().await;
    let criteria = SearchCriteria::from_fields(
        SearchFields {
            author: "Tolkien",
            ..Default::default()
        },
        Timeframe::FiveYears,
        "Mon Oct 19 2026".to_string(),
    )
    .unwrap();

    let response = adapter.search(SearchEndpoint::Search, &criteria).await.unwrap();

    let results = response.payload.unwrap();
    assert_eq!(results.result.title.as_deref(), Some("The Hobbit"));
    assert_eq!(results.result.publication_date.as_deref(), Some("1937"));

    let form = form_of(&received, "/search.json");
    assert_eq!(form.get("author").map(String::as_str), Some("Tolkien"));
    assert_eq!(form.get("timeframe").map(String::as_str), Some("5y"));
    assert_eq!(form.get("date").map(String::as_str), Some("Mon Oct 19 2026"));
    assert!(!form.contains_key("series"));
}

#[tokio::test]
async fn series_page_renders_not_found_and_most_recent() {
    let (adapter, received) = start_server().await;
    let api: Arc<dyn BibliofindApi> = Arc::new(adapter);
    let page = Page::new(vec![SeriesOption {
        id: "42".to_string(),
        name: "Discworld".to_string(),
    }]);
    let mut controller = SearchInteractionController::new(
        api,
        Arc::new(SystemClock),
        PageConfig::series_results_page(),
        page,
    );

    controller.sync_favorite_field(FieldChange::Series("42".to_string()));
    let completion = controller.submit_search().await.unwrap();

    assert_eq!(completion, SearchCompletion::Rendered);
    assert_eq!(controller.page().results_text, "No books found in timeframe.");
    assert!(controller.page().most_recent_html.contains("Most recent: Mort"));

    let form = form_of(&received, "/series-result.json");
    assert_eq!(form.get("id").map(String::as_str), Some("42"));
    assert_eq!(form.get("name").map(String::as_str), Some("Discworld"));
}

#[tokio::test]
async fn author_favorite_resolves_then_adds() {
    let (adapter, received) = start_server().await;
    let api: Arc<dyn BibliofindApi> = Arc::new(adapter);
    let mut controller = SearchInteractionController::new(
        api,
        Arc::new(SystemClock),
        PageConfig::search_page(),
        Page::default(),
    );
    controller.select_mode(SearchMode::Author).unwrap();
    controller.sync_favorite_field(FieldChange::Author("Tolkien".to_string()));
    controller.submit_search().await.unwrap();

    let report = controller.add_favorite().await.unwrap();

    assert!(report.succeeded());
    assert_eq!(report.message, "Tolkien added!");
    assert_eq!(
        form_of(&received, "/get-author-id.json").get("author").map(String::as_str),
        Some("Tolkien")
    );
    assert_eq!(
        form_of(&received, "/update-fav-author.json").get("author_id").map(String::as_str),
        Some("17")
    );
}

#[tokio::test]
async fn email_sends_empty_snapshot_verbatim() {
    let (adapter, received) = start_server().await;
    let request = NotificationRequest {
        title: "Bibliofind Search Results for Tolkien".to_string(),
        html_body: String::new(),
    };

    let response = adapter.email_results(&request).await.unwrap();

    assert_eq!(response.outcome, Outcome::Ok);
    assert_eq!(response.message, "Sent!");
    let form = form_of(&received, "/email-info.json");
    assert_eq!(form.get("result").map(String::as_str), Some(""));
}

#[tokio::test]
async fn failed_series_lookup_reports_server_status() {
    let (adapter, _) = start_server().await;

    let response = adapter.resolve_series_id("Earthsea").await.unwrap();

    assert_eq!(response.outcome, Outcome::Error);
    assert_eq!(response.message, "Series not found");
}

#[tokio::test]
async fn unauthorized_and_unreachable_are_port_errors() {
    let (adapter, _) = start_server().await;
    assert!(matches!(
        adapter.add_favorite_series("42").await,
        Err(PortError::Unauthorized)
    ));

    // Nothing listens on port 9 of the loopback interface.
    let config = Config::from_lookup(|key| match key {
        "BIBLIOFIND_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
        _ => None,
    })
    .unwrap();
    let offline = HttpApiAdapter::from_config(&config).unwrap();
    assert!(matches!(
        offline.resolve_author_id("Tolkien").await,
        Err(PortError::Transport(_))
    ));
}

#[tokio::test]
async fn undecodable_body_fails_like_transport() {
    let app = Router::new().route("/search.json", post(|| async { "<html>oops</html>" }));
    let adapter = serve(app).await;
    let criteria = SearchCriteria::from_fields(
        SearchFields {
            author: "Tolkien",
            ..Default::default()
        },
        Timeframe::FiveYears,
        "Mon Oct 19 2026".to_string(),
    )
    .unwrap();
    assert!(matches!(
        adapter.search(SearchEndpoint::Search, &criteria).await,
        Err(PortError::MalformedResponse(_))
    ));

    let api: Arc<dyn BibliofindApi> = Arc::new(adapter);
    let mut controller = SearchInteractionController::new(
        api,
        Arc::new(SystemClock),
        PageConfig::search_page(),
        Page::default(),
    );
    controller.select_mode(SearchMode::Author).unwrap();
    controller.page_mut().author = "Tolkien".to_string();

    assert_eq!(controller.submit_search().await, Ok(SearchCompletion::Failed));
    let page = controller.page();
    assert_eq!(page.notices.last(), Some(RETRY_MESSAGE));
    assert!(!page.submit_button.is_spinning());
    assert_eq!(page.submit_button.label(), Some(SEARCH_LABEL));
    assert!(page.results_html.is_empty());
}
