use serde_json::{Value, json};
use skycast_core::{
    AppState, Config, CredentialState, CredentialStore, LookupError, LookupOutcome, LookupQuery,
    MemoryCredentialStore, StartupAction, Theme,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body(name: &str, main: &str, dt: i64, timezone: i64) -> Value {
    json!({
        "coord": {"lon": 28.0473, "lat": -26.2041},
        "weather": [{"id": 800, "main": main, "description": main.to_lowercase(), "icon": "01d"}],
        "main": {"temp": 21.3, "feels_like": 20.8, "humidity": 40, "pressure": 1018},
        "visibility": 10000,
        "wind": {"speed": 3.0},
        "dt": dt,
        "sys": {"country": "ZA"},
        "timezone": timezone,
        "name": name,
        "cod": 200
    })
}

fn forecast_body() -> Value {
    let list: Vec<Value> = (0..40)
        .map(|i: i64| {
            json!({
                "dt": 1_714_521_600 + i * 10_800,
                "dt_txt": format!("2024-05-{:02} {:02}:00:00", 1 + i / 8, (i % 8) * 3),
                "main": {"temp": 15.0 + i as f64 / 4.0},
                "weather": [{"main": "Clouds", "description": "few clouds", "icon": "02d"}]
            })
        })
        .collect();
    json!({"cod": "200", "cnt": 40, "list": list})
}

fn app_for(server: &MockServer) -> AppState<MemoryCredentialStore> {
    let cfg = Config { base_url: Some(server.uri()), ..Config::default() };
    AppState::new(&cfg, MemoryCredentialStore::with("TESTKEY")).expect("app state")
}

async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "-26.2041"))
        .and(query_param("lon", "28.0473"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TESTKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn by_name_resolves_and_forecasts_at_returned_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Joburg"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TESTKEY"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Clouds", 1_714_564_800, 7_200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_forecast(&server).await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_name("Joburg")).await;

    let LookupOutcome::Rendered(bundle) = outcome else {
        panic!("expected render, got {outcome:?}");
    };
    assert_eq!(bundle.current.location.name, "Johannesburg");
    assert_eq!(bundle.daily.len(), 5);
    assert!(bundle.daily.iter().all(|s| s.sample_time_text.ends_with("12:00:00")));
    // 12:00 UTC at +2h is 14:00 local.
    assert_eq!(bundle.theme, Theme::Cloudy);
    assert_eq!(app.theme(), Theme::Cloudy);
    assert_eq!(app.map().center, bundle.focus);
    assert!(app.map().marker.is_some());
}

#[tokio::test]
async fn by_coords_sends_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "-26.2"))
        .and(query_param("lon", "28.05"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Rain", 1_714_564_800, 0)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_forecast(&server).await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_coords(-26.2, 28.05)).await;

    match outcome {
        LookupOutcome::Rendered(bundle) => assert_eq!(bundle.theme, Theme::Rainy),
        other => panic!("expected render, got {other:?}"),
    }
}

#[tokio::test]
async fn clear_sky_at_local_night_uses_night_theme() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Clear", 1_700_000_000, 7_200)),
        )
        .mount(&server)
        .await;
    mount_forecast(&server).await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    match outcome {
        LookupOutcome::Rendered(bundle) => assert_eq!(bundle.theme, Theme::Night),
        other => panic!("expected render, got {other:?}"),
    }
    assert_eq!(app.theme(), Theme::Night);
}

#[tokio::test]
async fn unauthorized_clears_credential_and_skips_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"cod": 401, "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."}),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    assert_eq!(
        outcome,
        LookupOutcome::Failed { error: LookupError::Unauthorized, restart: true }
    );
    assert_eq!(app.credential_state(), CredentialState::Unset);
    assert_eq!(app.startup(), StartupAction::PromptForCredential);
}

#[tokio::test]
async fn not_found_leaves_previous_render() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Johannesburg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Clear", 1_714_564_800, 0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Nowhereville"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Only the first, successful lookup reaches the forecast endpoint.
    mount_forecast(&server).await;

    let mut app = app_for(&server);
    let first = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;
    assert!(matches!(first, LookupOutcome::Rendered(_)));
    let before = app.last_render().cloned();

    let outcome = app.run_lookup(&LookupQuery::by_name("Nowhereville")).await;

    assert_eq!(
        outcome,
        LookupOutcome::Failed { error: LookupError::NotFound, restart: false }
    );
    assert_eq!(app.last_render().cloned(), before);
    assert_eq!(app.theme(), Theme::Clear);
    assert_eq!(app.credential_state(), CredentialState::Set);
}

#[tokio::test]
async fn other_status_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    match outcome {
        LookupOutcome::Failed { error: LookupError::Transient(_), restart: false } => {}
        other => panic!("expected transient failure, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_forecast_is_transient_and_renders_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Clear", 1_714_564_800, 0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"cod": 401, "message": "Invalid API key."})),
        )
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    // Forecast status is not classified; the error body fails to decode.
    match outcome {
        LookupOutcome::Failed { error: LookupError::Transient(_), restart: false } => {}
        other => panic!("expected transient failure, got {other:?}"),
    }
    assert!(app.last_render().is_none());
    assert_eq!(app.credential_state(), CredentialState::Set);
}

#[tokio::test]
async fn unreachable_provider_is_transient() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let cfg = Config { base_url: Some(uri), ..Config::default() };
    let mut app = AppState::new(&cfg, MemoryCredentialStore::with("TESTKEY")).unwrap();
    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    assert!(matches!(
        outcome,
        LookupOutcome::Failed { error: LookupError::Transient(_), .. }
    ));
}

#[tokio::test]
async fn repeated_lookup_is_deterministic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Johannesburg", "Haze", 1_714_564_800, 0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(2)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    let first = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;
    let second = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    assert_eq!(first, second);
    match first {
        LookupOutcome::Rendered(bundle) => {
            assert_eq!(bundle.theme, Theme::Cloudy);
            assert_eq!(bundle.daily.len(), 5);
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[tokio::test]
async fn credential_store_is_cleared_on_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    let cfg = Config {
        api_key: Some("STALE".into()),
        base_url: Some(server.uri()),
        ..Config::default()
    };
    cfg.save_to(&cfg_path).unwrap();

    let store = skycast_core::FileCredentialStore::new(&cfg_path);
    let mut app = AppState::new(&cfg, store.clone()).unwrap();
    app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;

    assert!(store.load().unwrap().is_none());
    assert_eq!(Config::load_from(&cfg_path).unwrap().base_url, Some(server.uri()));
}

/// Store that can be read but never written, like a read-only config file.
#[derive(Debug)]
struct ReadOnlyStore(&'static str);

impl CredentialStore for ReadOnlyStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(Some(self.0.to_string()))
    }

    fn save(&mut self, _credential: &str) -> anyhow::Result<()> {
        anyhow::bail!("config file is read-only")
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("config file is read-only")
    }
}

#[tokio::test]
async fn unauthorized_unsets_credential_even_if_storage_is_read_only() {
    let server = MockServer::start().await;

    // A second request with the rejected key must not happen.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = Config { base_url: Some(server.uri()), ..Config::default() };
    let mut app = AppState::new(&cfg, ReadOnlyStore("REJECTED")).unwrap();

    let outcome = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;
    assert_eq!(
        outcome,
        LookupOutcome::Failed { error: LookupError::Unauthorized, restart: true }
    );
    assert_eq!(app.credential_state(), CredentialState::Unset);
    assert_eq!(app.startup(), StartupAction::PromptForCredential);

    let again = app.run_lookup(&LookupQuery::by_name("Johannesburg")).await;
    assert_eq!(
        again,
        LookupOutcome::Failed { error: LookupError::Unauthorized, restart: true }
    );
}
