//! HTTP integration tests.
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it with `oneshot`, no socket involved.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pokerhall_api::{create_router, ApiConfig, AppState};
use pokerhall_core::Role;
use pokerhall_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot` method

// ============================================================================
// Test Helpers
// ============================================================================

struct TestApp {
    router: Router,
    db: Database,
}

async fn create_test_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db.clone(), ApiConfig::for_tests());
    TestApp {
        router: create_router(state),
        db,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn register(&self, fiscal_code: &str, name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "name": name,
                    "surname": "Tester",
                    "age": 30,
                    "capital": 1000.0,
                    "fiscal_code": fiscal_code,
                    "password": "secret",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body
    }

    async fn login(&self, fiscal_code: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "fiscal_code": fiscal_code, "password": "secret" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Registers a player, optionally promotes them, and logs in.
    async fn account(&self, fiscal_code: &str, name: &str, role: Role) -> (String, String) {
        let player = self.register(fiscal_code, name).await;
        let id = player["id"].as_str().unwrap().to_string();
        if role == Role::Crupier {
            self.db.players().set_role(&id, Role::Crupier).await.unwrap();
        }
        let token = self.login(fiscal_code).await;
        (id, token)
    }

    async fn create_event(&self, token: &str, tables: i64, seats: i64) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/events",
            Some(token),
            Some(json!({
                "name": "Friday Night",
                "date": "2026-11-06",
                "table_count": tables,
                "seats_per_table": seats,
            })),
        )
        .await
    }
}

fn seat_id(event: &Value, table_number: u64, seat_number: u64) -> String {
    event["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["table_number"] == table_number)
        .unwrap()["seats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["seat_number"] == seat_number)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

// ============================================================================
// Health & Auth
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_register_login_me() {
    let app = create_test_app().await;

    let player = app.register("rssmra80", "Mario").await;
    assert_eq!(player["fiscal_code"], "RSSMRA80");
    assert_eq!(player["role"], "PLAYER");
    assert!(player.get("password_hash").is_none());

    // Login normalizes the fiscal code the same way.
    let token = app.login("RssMra80").await;

    let (status, me) = app.send(Method::GET, "/api/v1/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], player["id"]);
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = create_test_app().await;
    app.register("PWD001", "Pia").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "fiscal_code": "PWD001", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "fiscal_code": "NOBODY", "password": "secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_fiscal_code() {
    let app = create_test_app().await;
    app.register("DUP001", "First").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "Second",
                "surname": "Tester",
                "age": 25,
                "capital": 10.0,
                "fiscal_code": "dup001",
                "password": "other",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_KEY");
    assert_eq!(app.db.players().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validation() {
    let app = create_test_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "",
                "surname": "Tester",
                "age": 30,
                "capital": 0.0,
                "fiscal_code": "EMPTY01",
                "password": "secret",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "Old",
                "surname": "Tester",
                "age": 400,
                "capital": 0.0,
                "fiscal_code": "OLD001",
                "password": "secret",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_or_bad_token() {
    let app = create_test_app().await;

    let (status, body) = app.send(Method::GET, "/api/v1/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let (status, _) = app
        .send(Method::GET, "/api/v1/events", Some("not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Access Policy
// ============================================================================

#[tokio::test]
async fn test_player_cannot_create_event_or_score() {
    let app = create_test_app().await;
    let (player_id, token) = app.account("PLY001", "Paolo", Role::Player).await;

    let (status, body) = app.create_event(&token, 2, 3).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(app.db.events().count().await.unwrap(), 0);

    let (_, crupier_token) = app.account("CRP001", "Carla", Role::Crupier).await;
    let (_, event) = app.create_event(&crupier_token, 1, 2).await;
    let event_id = event["event"]["id"].as_str().unwrap();

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/v1/events/{event_id}/scores"),
            Some(&token),
            Some(json!({
                "player_id": player_id,
                "final_capital": 100.0,
                "bluff_score": 0.0,
                "win_score": 0.0,
                "crupier_vote": 0.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_change_applies_to_existing_token() {
    let app = create_test_app().await;
    let (_, crupier_token) = app.account("CRP002", "Carla", Role::Crupier).await;
    let (player_id, player_token) = app.account("PLY002", "Piero", Role::Player).await;

    let (status, _) = app.create_event(&player_token, 1, 1).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Only a crupier may promote.
    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/players/{player_id}/role"),
            Some(&player_token),
            Some(json!({ "role": "CRUPIER" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/v1/players/{player_id}/role"),
            Some(&crupier_token),
            Some(json!({ "role": "CRUPIER" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "CRUPIER");

    let (status, _) = app.create_event(&player_token, 1, 1).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/v1/players/{player_id}/role"),
            Some(&crupier_token),
            Some(json!({ "role": "DEALER" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_capital_adjustment() {
    let app = create_test_app().await;
    let (_, crupier_token) = app.account("CRP003", "Carla", Role::Crupier).await;
    let (player_id, player_token) = app.account("PLY003", "Pina", Role::Player).await;

    let uri = format!("/api/v1/players/{player_id}/capital");

    let (status, _) = app
        .send(Method::POST, &uri, Some(&player_token), Some(json!({ "delta": 50.0 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::POST, &uri, Some(&crupier_token), Some(json!({ "delta": -250.0 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capital"], 750.0);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/players/ghost/capital",
            Some(&crupier_token),
            Some(json!({ "delta": 1.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ============================================================================
// Events, Seats, Scores
// ============================================================================

#[tokio::test]
async fn test_invalid_layout_rejected() {
    let app = create_test_app().await;
    let (_, token) = app.account("CRP004", "Carla", Role::Crupier).await;

    for (tables, seats) in [(0, 3), (2, 0), (-1, 5), (1001, 1), (1, 101)] {
        let (status, body) = app.create_event(&token, tables, seats).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{tables}x{seats}");
        assert_eq!(body["code"], "INVALID_ARGUMENT");
    }
    assert_eq!(app.db.events().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_body_returns_error_shape() {
    let app = create_test_app().await;
    let (_, token) = app.account("CRP006", "Carla", Role::Crupier).await;

    let bodies = [
        json!({ "name": "Bad Date", "date": "not-a-date", "table_count": 2, "seats_per_table": 3 }),
        json!({ "name": "Bad Count", "date": "2026-11-06", "table_count": "two", "seats_per_table": 3 }),
        json!({ "name": "Missing Layout", "date": "2026-11-06" }),
        json!("not an object"),
    ];
    for body in bodies {
        let (status, response) = app
            .send(Method::POST, "/api/v1/events", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["code"], "INVALID_ARGUMENT", "{body}");
        assert!(response["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
    assert_eq!(app.db.events().count().await.unwrap(), 0);

    // Bodies on the unauthenticated routes get the same treatment.
    let (status, response) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "fiscal_code": 42 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_unknown_ranking_mode_rejected() {
    let app = create_test_app().await;
    let (_, crupier) = app.account("CRP007", "Carla", Role::Crupier).await;
    let (_, event) = app.create_event(&crupier, 1, 2).await;
    let event_id = event["event"]["id"].as_str().unwrap();

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/v1/events/{event_id}/ranking?mode=bogus"),
            Some(&crupier),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/v1/events/{event_id}/ranking?mode=per_player"),
            Some(&crupier),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_overflowing_score_total_rejected() {
    let app = create_test_app().await;
    let (_, crupier) = app.account("CRP008", "Carla", Role::Crupier).await;
    let (player, _) = app.account("PBIG01", "Grande", Role::Player).await;
    let (_, event) = app.create_event(&crupier, 1, 2).await;
    let scores_uri = format!("/api/v1/events/{}/scores", event["event"]["id"].as_str().unwrap());

    let (status, body) = app
        .send(
            Method::POST,
            &scores_uri,
            Some(&crupier),
            Some(json!({
                "player_id": player,
                "final_capital": 1e308,
                "bluff_score": 1e308,
                "win_score": 0.0,
                "crupier_vote": 0.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["message"], "total must be a finite number");

    let (status, scores) = app.send(Method::GET, &scores_uri, Some(&crupier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores, json!([]));
}

#[tokio::test]
async fn test_tournament_scenario() {
    let app = create_test_app().await;
    let (_, crupier) = app.account("CRP005", "Carla", Role::Crupier).await;
    let (p1, p1_token) = app.account("PONE01", "Primo", Role::Player).await;
    let (p2, _) = app.account("PTWO02", "Secondo", Role::Player).await;

    // Layout: 2 tables x 3 seats, all free.
    let (status, event) = app.create_event(&crupier, 2, 3).await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["event"]["id"].as_str().unwrap().to_string();
    let tables = event["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    for table in tables {
        let seats = table["seats"].as_array().unwrap();
        let numbers: Vec<u64> = seats.iter().map(|s| s["seat_number"].as_u64().unwrap()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(seats.iter().all(|s| s["occupant"].is_null()));
    }

    // P1 takes table 1 seat 1.
    let t1s1 = seat_id(&event, 1, 1);
    let (status, seat) = app
        .send(
            Method::POST,
            &format!("/api/v1/seats/{t1s1}/assign"),
            Some(&p1_token),
            Some(json!({ "player_id": p1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seat["player_id"], p1.as_str());

    // P1 cannot take a second seat in the same event.
    let t2s1 = seat_id(&event, 2, 1);
    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/v1/seats/{t2s1}/assign"),
            Some(&p1_token),
            Some(json!({ "player_id": p1 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_SEATED");

    // P2 cannot take P1's seat.
    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/v1/seats/{t1s1}/assign"),
            Some(&p1_token),
            Some(json!({ "player_id": p2 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SEAT_OCCUPIED");

    // The event page shows the occupant.
    let (status, detail) = app
        .send(Method::GET, &format!("/api/v1/events/{event_id}"), Some(&p1_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["tables"][0]["seats"][0]["occupant"]["player_id"], p1.as_str());
    assert_eq!(detail["tables"][0]["seats"][0]["occupant"]["name"], "Primo");

    // Two score rows for P2.
    let scores_uri = format!("/api/v1/events/{event_id}/scores");
    for (fc, bluff, win, vote) in [(10.0, 5.0, 2.0, 1.0), (-3.0, 0.0, 1.0, 0.0)] {
        let (status, _) = app
            .send(
                Method::POST,
                &scores_uri,
                Some(&crupier),
                Some(json!({
                    "player_id": p2,
                    "final_capital": fc,
                    "bluff_score": bluff,
                    "win_score": win,
                    "crupier_vote": vote,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, scores) = app.send(Method::GET, &scores_uri, Some(&p1_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores.as_array().unwrap().len(), 2);

    // Default ranking: one entry per row.
    let (status, ranking) = app
        .send(
            Method::GET,
            &format!("/api/v1/events/{event_id}/ranking"),
            Some(&p1_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let ranking = ranking.as_array().unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0]["player_id"], p2.as_str());
    assert_eq!(ranking[0]["total_score"], 18.0);
    assert_eq!(ranking[0]["position"], 1);
    assert_eq!(ranking[1]["player_id"], p2.as_str());
    assert_eq!(ranking[1]["total_score"], -2.0);

    // Per-player ranking sums the rows.
    let (status, ranking) = app
        .send(
            Method::GET,
            &format!("/api/v1/events/{event_id}/ranking?mode=per_player"),
            Some(&p1_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let ranking = ranking.as_array().unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0]["total_score"], 16.0);
    assert_eq!(ranking[0]["score_rows"], 2);
}

#[tokio::test]
async fn test_unknown_resources() {
    let app = create_test_app().await;
    let (player_id, token) = app.account("CRP006", "Carla", Role::Crupier).await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/events/missing", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app
        .send(Method::GET, "/api/v1/events/missing/ranking", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/seats/missing/assign",
            Some(&token),
            Some(json!({ "player_id": player_id })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/events/missing/scores",
            Some(&token),
            Some(json!({
                "player_id": player_id,
                "final_capital": 1.0,
                "bluff_score": 0.0,
                "win_score": 0.0,
                "crupier_vote": 0.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_endpoints() {
    let app = create_test_app().await;
    let (_, crupier) = app.account("CRP007", "Carla", Role::Crupier).await;
    let (_, token) = app.account("PLY007", "Pia", Role::Player).await;

    app.create_event(&crupier, 1, 2).await;
    app.create_event(&crupier, 3, 4).await;

    let (status, events) = app.send(Method::GET, "/api/v1/events", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().unwrap().len(), 2);

    let (status, players) = app.send(Method::GET, "/api/v1/players", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let players = players.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p.get("password_hash").is_none()));
}
