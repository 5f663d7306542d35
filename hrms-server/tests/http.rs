use axum::body::Body;
use axum::http::Request;
use axum::Router;
use chrono::Utc;
use hrms_auth::AuthOptions;
use hrms_core::{Role, TenantContext};
use hrms_server::services::audit::AuditWriter;
use hrms_server::{build, HrmsState};
use hrms_store::{AuditRepo, Db, OrganizationRepo};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn state() -> HrmsState {
    let db = Db::in_memory().await.unwrap();
    let mut auth = AuthOptions::with_secret("test-secret");
    auth.password.cost = 4;
    HrmsState::new(db, &auth).unwrap()
}

fn app(state: &HrmsState) -> Router {
    build(state.clone()).into_router()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status().as_u16();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Register an organization; returns its token and the admin profile.
async fn register(app: &Router, org: &str, email: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register-org",
        None,
        Some(json!({
            "orgName": org,
            "adminName": "Admin",
            "adminEmail": email,
            "password": "pw123",
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    (body["token"].as_str().unwrap().to_string(), body["user"].clone())
}

async fn create_employee(app: &Router, token: &str, first: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/employees",
        Some(token),
        Some(json!({
            "firstName": first,
            "lastName": "Doe",
            "email": format!("{}@acme.com", first.to_lowercase()),
            "position": "Engineer",
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_team(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/teams",
        Some(token),
        Some(json!({ "name": name, "description": "Engineering" })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    body["id"].as_i64().unwrap()
}

fn actions(logs: &Value) -> Vec<&str> {
    logs.as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn health_reports_running_and_sets_request_id() {
    let state = state().await;
    let res = app(&state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "HRMS API running" }));
}

#[tokio::test]
async fn registration_returns_admin_profile_and_rejects_reused_email() {
    let state = state().await;
    let app = app(&state);

    let (_, acme) = register(&app, "Acme", "a@acme.com").await;
    assert_eq!(acme["email"], "a@acme.com");
    assert_eq!(acme["role"], "ADMIN");
    assert_eq!(acme["name"], "Admin");
    assert!(acme.get("passwordHash").is_none());
    register(&app, "Globex", "b@globex.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register-org",
        None,
        Some(json!({
            "orgName": "Other",
            "adminName": "Someone",
            "adminEmail": "a@acme.com",
            "password": "x",
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "message": "User already exists with this email" }));

    let orgs = OrganizationRepo::new(state.db.clone());
    assert_eq!(orgs.count_organizations().await.unwrap(), 2);
}

#[tokio::test]
async fn registration_requires_every_field() {
    let state = state().await;
    let (status, body) = send(
        &app(&state),
        "POST",
        "/api/auth/register-org",
        None,
        Some(json!({ "orgName": "Acme", "adminEmail": "a@acme.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "message": "Missing required fields" }));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = state().await;
    let app = app(&state);
    register(&app, "Acme", "a@acme.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@acme.com", "password": "pw123" })),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "a@acme.com");

    let wrong_password = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@acme.com", "password": "nope" })),
    )
    .await;
    let unknown_email = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@acme.com", "password": "pw123" })),
    )
    .await;
    let missing_field = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@acme.com" })),
    )
    .await;

    assert_eq!(wrong_password, (401, json!({ "message": "Invalid credentials" })));
    assert_eq!(unknown_email, wrong_password);
    assert_eq!(missing_field, wrong_password);
}

#[tokio::test]
async fn records_of_another_organization_are_not_found() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;
    let (globex, _) = register(&app, "Globex", "b@globex.com").await;

    let employee = create_employee(&app, &acme, "Jane").await;
    let team = create_team(&app, &acme, "Eng").await;

    for (uri, message) in [
        (format!("/api/employees/{employee}"), "Employee not found"),
        (format!("/api/teams/{team}"), "Team not found"),
    ] {
        let expected = (404, json!({ "message": message }));
        assert_eq!(send(&app, "GET", &uri, Some(&globex), None).await, expected);
        assert_eq!(
            send(&app, "PUT", &uri, Some(&globex), Some(json!({ "name": "X", "position": "X" }))).await,
            expected
        );
        assert_eq!(send(&app, "DELETE", &uri, Some(&globex), None).await, expected);
    }

    let (_, list) = send(&app, "GET", "/api/employees", Some(&globex), None).await;
    assert_eq!(list, json!([]));

    let (status, body) = send(&app, "GET", &format!("/api/employees/{employee}"), Some(&acme), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["firstName"], "Jane");
}

#[tokio::test]
async fn assign_teams_keeps_only_own_teams_and_replaces_the_set() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;
    let (globex, _) = register(&app, "Globex", "b@globex.com").await;

    let employee = create_employee(&app, &acme, "Jane").await;
    let eng = create_team(&app, &acme, "Eng").await;
    let ops = create_team(&app, &acme, "Ops").await;
    let foreign = create_team(&app, &globex, "Sales").await;
    let uri = format!("/api/employees/{employee}/teams");

    let (status, body) = send(&app, "POST", &uri, Some(&acme), Some(json!({ "teamIds": [ops, eng] }))).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "teamIds": [eng, ops] }));

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&acme),
        Some(json!({ "teamIds": [ops, foreign] })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "teamIds": [ops] }));

    let (_, read) = send(&app, "GET", &format!("/api/employees/{employee}"), Some(&acme), None).await;
    let teams: Vec<i64> = read["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(teams, vec![ops]);

    let (status, _) = send(&app, "POST", &uri, Some(&globex), Some(json!({ "teamIds": [foreign] }))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deleting_a_team_drops_its_memberships() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;
    let employee = create_employee(&app, &acme, "Jane").await;
    let eng = create_team(&app, &acme, "Eng").await;
    send(
        &app,
        "POST",
        &format!("/api/employees/{employee}/teams"),
        Some(&acme),
        Some(json!({ "teamIds": [eng] })),
    )
    .await;

    let (_, team) = send(&app, "GET", &format!("/api/teams/{eng}"), Some(&acme), None).await;
    assert_eq!(team["members"][0]["id"], employee);

    let (status, body) = send(&app, "DELETE", &format!("/api/teams/{eng}"), Some(&acme), None).await;
    assert_eq!((status, body), (200, json!({ "success": true })));

    let (_, read) = send(&app, "GET", &format!("/api/employees/{employee}"), Some(&acme), None).await;
    assert_eq!(read["teams"], json!([]));
}

#[tokio::test]
async fn update_overwrites_only_supplied_fields() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;
    let employee = create_employee(&app, &acme, "Jane").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/employees/{employee}"),
        Some(&acme),
        Some(json!({ "position": "Manager" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["position"], "Manager");
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["teams"], json!([]));

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/employees/{employee}"),
        Some(&acme),
        Some(json!({ "firstName": "  " })),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn invalid_input_is_400() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&acme),
        Some(json!({ "firstName": "Jane", "lastName": "Doe" })),
    )
    .await;
    assert_eq!((status, body), (400, json!({ "message": "Missing required fields" })));

    let (status, _) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&acme),
        Some(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "not-an-email",
            "position": "Engineer",
        })),
    )
    .await;
    assert_eq!(status, 400);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/teams")
                .header("authorization", format!("Bearer {acme}"))
                .header("content-type", "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);

    let (status, body) = send(&app, "GET", "/api/employees/abc", Some(&acme), None).await;
    assert_eq!((status, body), (404, json!({ "message": "Employee not found" })));
}

#[tokio::test]
async fn log_limit_returns_the_newest_entries_first() {
    let state = state().await;
    let app = app(&state);
    let (acme, _) = register(&app, "Acme", "a@acme.com").await;
    let employee = create_employee(&app, &acme, "Jane").await;
    create_team(&app, &acme, "Eng").await;
    send(
        &app,
        "PUT",
        &format!("/api/employees/{employee}"),
        Some(&acme),
        Some(json!({ "position": "Lead" })),
    )
    .await;
    create_team(&app, &acme, "Ops").await;

    let (status, logs) = send(&app, "GET", "/api/logs?limit=2", Some(&acme), None).await;
    assert_eq!(status, 200);
    assert_eq!(actions(&logs), vec!["TEAM_CREATE", "EMPLOYEE_UPDATE"]);
    assert_eq!(logs[0]["message"], "Team \"Ops\" created");
    assert_eq!(logs[0]["user"]["email"], "a@acme.com");

    let (_, logs) = send(&app, "GET", "/api/logs?limit=abc", Some(&acme), None).await;
    assert_eq!(logs.as_array().unwrap().len(), 5);

    let (_, logs) = send(&app, "GET", "/api/logs?action=TEAM_CREATE", Some(&acme), None).await;
    assert_eq!(actions(&logs), vec!["TEAM_CREATE", "TEAM_CREATE"]);
}

#[tokio::test]
async fn login_team_changes_and_deletes_are_audited() {
    let state = state().await;
    let app = app(&state);
    register(&app, "Acme", "a@acme.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@acme.com", "password": "pw123" })),
    )
    .await;
    assert_eq!(status, 200);
    let token = body["token"].as_str().unwrap().to_string();

    let team = create_team(&app, &token, "Eng").await;
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/teams/{team}"),
        Some(&token),
        Some(json!({ "name": "Ops" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["id"], team);
    assert_eq!(updated["name"], "Ops");
    assert_eq!(updated["description"], "Engineering");
    assert_eq!(updated["members"], json!([]));

    let (status, _) = send(&app, "DELETE", &format!("/api/teams/{team}"), Some(&token), None).await;
    assert_eq!(status, 200);

    let employee = create_employee(&app, &token, "Jane").await;
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/employees/{employee}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true }));

    let (status, logs) = send(&app, "GET", "/api/logs", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(
        actions(&logs),
        vec![
            "EMPLOYEE_DELETE",
            "EMPLOYEE_CREATE",
            "TEAM_DELETE",
            "TEAM_UPDATE",
            "TEAM_CREATE",
            "USER_LOGIN",
            "ORG_REGISTER",
        ]
    );
    assert_eq!(logs[0]["entityType"], "EMPLOYEE");
    assert_eq!(logs[0]["entityId"], employee);
    assert_eq!(logs[2]["entityId"], team);
    assert_eq!(logs[5]["entityType"], "USER");
}

#[tokio::test]
async fn acme_walkthrough() {
    let state = state().await;
    let app = app(&state);
    let (token, admin) = register(&app, "Acme", "a@acme.com").await;

    let (status, employee) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&token),
        Some(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@acme.com",
            "position": "Engineer",
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(employee["organizationId"], admin["organizationId"]);
    let employee_id = employee["id"].as_i64().unwrap();

    let (status, team) = send(
        &app,
        "POST",
        "/api/teams",
        Some(&token),
        Some(json!({ "name": "Eng", "description": "Engineering" })),
    )
    .await;
    assert_eq!(status, 201);
    let team_id = team["id"].as_i64().unwrap();

    let (status, assigned) = send(
        &app,
        "POST",
        &format!("/api/employees/{employee_id}/teams"),
        Some(&token),
        Some(json!({ "teamIds": [team_id] })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(assigned, json!({ "success": true, "teamIds": [team_id] }));

    let (_, read) = send(&app, "GET", &format!("/api/employees/{employee_id}"), Some(&token), None).await;
    assert_eq!(read["teams"][0]["name"], "Eng");

    let (_, logs) = send(&app, "GET", "/api/logs", Some(&token), None).await;
    assert_eq!(
        actions(&logs),
        vec!["EMPLOYEE_TEAM_ASSIGN", "TEAM_CREATE", "EMPLOYEE_CREATE", "ORG_REGISTER"]
    );
    assert_eq!(logs[0]["meta"], json!({ "teamIds": [team_id] }));
    assert_eq!(logs[3]["entityType"], "ORGANIZATION");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let state = state().await;
    let app = app(&state);
    let (_, admin) = register(&app, "Acme", "a@acme.com").await;

    for uri in ["/api/employees", "/api/teams", "/api/logs"] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!((status, body), (401, json!({ "message": "No token provided" })));

        let (status, _) = send(&app, "GET", uri, Some("garbage"), None).await;
        assert_eq!(status, 401);
    }

    let identity = TenantContext::new(
        admin["organizationId"].as_i64().unwrap(),
        admin["id"].as_i64().unwrap(),
        Role::Admin,
        "a@acme.com",
    );
    let mut claims = state.codec.claims_for(&identity);
    claims.iat -= 10 * 3600;
    claims.exp = Utc::now().timestamp() - 60;
    let expired = state.codec.sign(&claims).unwrap();

    let (status, body) = send(&app, "GET", "/api/employees", Some(&expired), None).await;
    assert_eq!((status, body), (401, json!({ "message": "Invalid or expired token" })));
}

#[tokio::test]
async fn failing_audit_writes_do_not_change_results() {
    let mut state = state().await;
    let closed = Db::in_memory().await.unwrap();
    closed.close().await;
    state.audit = AuditWriter::new(AuditRepo::new(closed));
    let app = app(&state);

    let (token, _) = register(&app, "Acme", "a@acme.com").await;
    let employee = create_employee(&app, &token, "Jane").await;
    let (status, body) = send(&app, "DELETE", &format!("/api/employees/{employee}"), Some(&token), None).await;
    assert_eq!((status, body), (200, json!({ "success": true })));

    let (status, logs) = send(&app, "GET", "/api/logs", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(logs, json!([]));
}
