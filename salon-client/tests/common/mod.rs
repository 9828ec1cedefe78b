//! In-process mock of the booking API

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{MethodRouter, delete, get, patch, post};
use axum::{Json, Router};
use salon_client::{ClientConfig, MemoryTokenStore, SalonClient, TokenStore};
use serde_json::{Value, json};

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const ADMIN_PASSWORD: &str = "secret-pass";
pub const CUSTOMER_TOKEN: &str = "tok-cleo";
pub const SIGNUP_OTP: &str = "123456";
pub const RESET_OTP: &str = "654321";
pub const RESET_TOKEN: &str = "rst-1";
pub const INVITE_TOKEN: &str = "inv 42/a";
pub const BRANCH_TOTAL: u64 = 12;

#[derive(Default)]
pub struct MockState {
    pub branches: BTreeMap<String, Value>,
    pub me_calls: usize,
    pub login_calls: usize,
    pub logout_calls: usize,
    pub last_query: Option<String>,
    pub last_path: Option<String>,
    pub last_body: Option<Value>,
    /// Categories and services, keyed `"{collection}/{id}"`
    pub catalog: BTreeMap<String, Value>,
    /// Method and raw (still percent-encoded) path of every request
    pub requests: Vec<(String, String)>,
}

pub type Shared = Arc<Mutex<MockState>>;

type Reply = (StatusCode, Json<Value>);

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "message": message })))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn authorized(headers: &HeaderMap) -> bool {
    bearer(headers) == Some(ADMIN_TOKEN)
}

fn created(data: Value) -> Reply {
    (StatusCode::CREATED, Json(json!({ "success": true, "data": data })))
}

fn message(text: &str) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": null, "message": text })),
    )
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = (request.method().to_string(), request.uri().path().to_string());
    state.lock().unwrap().requests.push(line);
    next.run(request).await
}

pub fn admin_user() -> Value {
    json!({
        "id": "u-admin",
        "displayName": "Ada",
        "email": "ada@salon.test",
        "role": "ADMIN",
        "createdAt": "2025-01-10T09:00:00Z"
    })
}

pub fn customer_user() -> Value {
    json!({
        "id": "u-cleo",
        "displayName": "Cleo",
        "email": "cleo@salon.test",
        "role": "USER"
    })
}

pub fn stylist(id: &str) -> Value {
    json!({
        "id": id,
        "userId": "u-lena",
        "displayName": "Lena",
        "email": "lena@salon.test",
        "branchId": "b-1",
        "branchName": "Centro",
        "isActive": true,
        "isBlocked": false,
        "inviteStatus": "ACCEPTED"
    })
}

pub fn assignment(stylist_id: &str, branch_id: &str) -> Value {
    json!({
        "stylistId": stylist_id,
        "branchId": branch_id,
        "stylistName": "Lena",
        "isActive": true,
        "assignedAt": "2025-03-01T10:00:00Z"
    })
}

pub fn branch(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "Main St 1",
        "isActive": true,
        "isDeleted": false
    })
}

async fn admin_login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    state.lock().unwrap().login_calls += 1;
    if body["password"] != ADMIN_PASSWORD {
        return fail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    ok(json!({ "accessToken": ADMIN_TOKEN, "user": admin_user() }))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.lock().unwrap().me_calls += 1;
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    ok(admin_user())
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.lock().unwrap().logout_calls += 1;
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": null, "message": "Logged out" })),
    )
}

async fn list_branches(
    State(state): State<Shared>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    state.lock().unwrap().last_query = raw;

    let page: u64 = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let limit: u64 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(5);
    let start = (page - 1) * limit;
    let end = (start + limit).min(BRANCH_TOTAL);
    let items: Vec<Value> = (start..end)
        .map(|n| branch(&format!("b-{n}"), &format!("Branch {n}")))
        .collect();

    // metadata deliberately inconsistent; the client recomputes it
    ok(json!({
        "data": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": BRANCH_TOTAL,
            "totalPages": 1,
            "hasNext": false,
            "hasPrev": false
        }
    }))
}

async fn create_branch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    if body["name"] == "Taken" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "success": false,
                "message": "Validation failed",
                "errors": { "name": ["Branch name already exists"] }
            })),
        );
    }
    let id = format!("b-{}", uuid::Uuid::new_v4());
    let name = body["name"].as_str().unwrap_or_default();
    let created = branch(&id, name);
    state.lock().unwrap().branches.insert(id, created.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    )
}

async fn get_branch(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    match state.lock().unwrap().branches.get(&id) {
        Some(found) => ok(found.clone()),
        None => fail(StatusCode::NOT_FOUND, "Branch not found"),
    }
}

async fn delete_branch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    let Some(found) = state.branches.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Branch not found");
    };
    if found["isDeleted"] == true {
        return fail(StatusCode::CONFLICT, "Branch is already deleted");
    }
    found["isDeleted"] = json!(true);
    found["isActive"] = json!(false);
    ok(found.clone())
}

async fn restore_branch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    let Some(found) = state.branches.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Branch not found");
    };
    if found["isDeleted"] == false {
        return fail(StatusCode::CONFLICT, "Branch is not deleted");
    }
    found["isDeleted"] = json!(false);
    found["isActive"] = json!(true);
    ok(found.clone())
}

async fn toggle_branch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    let Some(found) = state.branches.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Branch not found");
    };
    let active = found["isActive"] == true;
    found["isActive"] = json!(!active);
    ok(found.clone())
}

async fn branch_stylists(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    RawQuery(raw): RawQuery,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    state.last_path = Some(format!("/branches/{id}/stylists"));
    state.last_query = raw;
    ok(json!({
        "data": [{
            "stylistId": "s-1",
            "branchId": id,
            "stylistName": "Lena",
            "isActive": true,
            "assignedAt": "2025-03-01T10:00:00Z"
        }],
        "pagination": { "page": 1, "limit": 10, "total": 1 }
    }))
}

async fn block_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    state.lock().unwrap().last_path = Some(format!("/admin/users/{id}/block"));
    ok(json!({
        "id": id,
        "displayName": "Bo",
        "role": "USER",
        "blocked": true
    }))
}

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let taken = body["email"] == "ada@salon.test";
    state.lock().unwrap().last_body = Some(body);
    if taken {
        return fail(StatusCode::CONFLICT, "Email already registered");
    }
    message("Verification code sent")
}

async fn verify_otp(Json(body): Json<Value>) -> Reply {
    if body["otp"] != SIGNUP_OTP {
        return fail(StatusCode::BAD_REQUEST, "Invalid or expired OTP");
    }
    ok(json!({ "accessToken": CUSTOMER_TOKEN, "user": customer_user() }))
}

async fn resend_otp() -> Reply {
    message("Verification code re-sent")
}

async fn verify_phone_otp(headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    if bearer(&headers) != Some(CUSTOMER_TOKEN) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    if body["otp"] != SIGNUP_OTP {
        return fail(StatusCode::BAD_REQUEST, "Invalid or expired OTP");
    }
    let mut user = customer_user();
    user["phone"] = body["identifier"].clone();
    ok(user)
}

async fn forgot_password() -> Reply {
    message("Reset code sent")
}

async fn verify_reset_otp(Json(body): Json<Value>) -> Reply {
    if body["otp"] != RESET_OTP {
        return fail(StatusCode::BAD_REQUEST, "Invalid or expired OTP");
    }
    ok(json!({ "resetToken": RESET_TOKEN }))
}

async fn reset_password(Json(body): Json<Value>) -> Reply {
    if body["resetToken"] != RESET_TOKEN {
        return fail(StatusCode::BAD_REQUEST, "Reset token is invalid");
    }
    message("Password updated")
}

async fn list_stylists(
    State(state): State<Shared>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    state.lock().unwrap().last_query = raw;
    ok(json!({
        "data": [stylist("s-1")],
        "pagination": { "page": 1, "limit": 10, "total": 1 }
    }))
}

async fn invite_stylist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let invited = json!({
        "id": "s-9",
        "displayName": body["displayName"],
        "email": body["email"],
        "isActive": false,
        "inviteStatus": "PENDING"
    });
    state.lock().unwrap().last_body = Some(body);
    created(invited)
}

fn set_stylist_blocked(headers: &HeaderMap, id: &str, blocked: bool) -> Reply {
    if !authorized(headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut found = stylist(id);
    found["isBlocked"] = json!(blocked);
    ok(found)
}

async fn block_stylist(headers: HeaderMap, Path(id): Path<String>) -> Reply {
    set_stylist_blocked(&headers, &id, true)
}

async fn unblock_stylist(headers: HeaderMap, Path(id): Path<String>) -> Reply {
    set_stylist_blocked(&headers, &id, false)
}

async fn verify_invite(Path(token): Path<String>) -> Reply {
    if token != INVITE_TOKEN {
        return fail(StatusCode::NOT_FOUND, "Invitation not found");
    }
    ok(json!({
        "email": "mia@salon.test",
        "displayName": "Mia",
        "branchName": "Centro",
        "expiresAt": "2025-04-01T00:00:00Z"
    }))
}

async fn accept_invite(
    State(state): State<Shared>,
    Path(token): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if token != INVITE_TOKEN {
        return fail(StatusCode::NOT_FOUND, "Invitation not found");
    }
    state.lock().unwrap().last_body = Some(body);
    ok(json!({
        "id": "s-9",
        "userId": "u-mia",
        "displayName": "Mia",
        "email": "mia@salon.test",
        "isActive": true,
        "inviteStatus": "ACCEPTED"
    }))
}

async fn assign_stylist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(branch_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let stylist_id = body["stylistId"].as_str().unwrap_or_default().to_string();
    state.lock().unwrap().last_body = Some(body);
    created(assignment(&stylist_id, &branch_id))
}

async fn unassign_stylist(
    headers: HeaderMap,
    Path((branch_id, stylist_id)): Path<(String, String)>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut ended = assignment(&stylist_id, &branch_id);
    ended["isActive"] = json!(false);
    ok(ended)
}

async fn change_stylist_branch(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((_branch_id, stylist_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let target = body["newBranchId"].as_str().unwrap_or_default().to_string();
    state.lock().unwrap().last_body = Some(body);
    ok(assignment(&stylist_id, &target))
}

pub fn category(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Cuts and colour",
        "isActive": true,
        "isDeleted": false
    })
}

pub fn service(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "categoryId": "c-1",
        "categoryName": "Hair",
        "price": 120.0,
        "durationMinutes": 90,
        "isActive": true,
        "isDeleted": false
    })
}

fn catalog_key(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

fn catalog_create(state: &Shared, headers: &HeaderMap, collection: &str, body: Value) -> Reply {
    if !authorized(headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let id = uuid::Uuid::new_v4().to_string();
    let mut record = body.clone();
    record["id"] = json!(id);
    record["isActive"] = json!(true);
    record["isDeleted"] = json!(false);

    let mut state = state.lock().unwrap();
    state.last_body = Some(body);
    state.catalog.insert(catalog_key(collection, &id), record.clone());
    created(record)
}

fn catalog_get(state: &Shared, headers: &HeaderMap, collection: &str, id: &str) -> Reply {
    if !authorized(headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    match state.lock().unwrap().catalog.get(&catalog_key(collection, id)) {
        Some(found) => ok(found.clone()),
        None => fail(StatusCode::NOT_FOUND, "Record not found"),
    }
}

fn catalog_update(state: &Shared, headers: &HeaderMap, collection: &str, id: &str, body: Value) -> Reply {
    if !authorized(headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    let Some(found) = state.catalog.get_mut(&catalog_key(collection, id)) else {
        return fail(StatusCode::NOT_FOUND, "Record not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            found[key.as_str()] = value.clone();
        }
    }
    let updated = found.clone();
    state.last_body = Some(body);
    ok(updated)
}

/// Soft delete (`deleted = true`), restore (`false`) or, with `None`, toggle
fn catalog_flag(state: &Shared, headers: &HeaderMap, collection: &str, id: &str, deleted: Option<bool>) -> Reply {
    if !authorized(headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    let mut state = state.lock().unwrap();
    let Some(found) = state.catalog.get_mut(&catalog_key(collection, id)) else {
        return fail(StatusCode::NOT_FOUND, "Record not found");
    };
    match deleted {
        Some(deleted) => {
            if found["isDeleted"] == deleted {
                return fail(StatusCode::CONFLICT, "Record is already in that state");
            }
            found["isDeleted"] = json!(deleted);
            found["isActive"] = json!(!deleted);
        }
        None => {
            let active = found["isActive"] == true;
            found["isActive"] = json!(!active);
        }
    }
    ok(found.clone())
}

fn catalog_collection(collection: &'static str) -> MethodRouter<Shared> {
    post(
        move |State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>| async move {
            catalog_create(&state, &headers, collection, body)
        },
    )
}

fn catalog_item(collection: &'static str) -> MethodRouter<Shared> {
    get(
        move |State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>| async move {
            catalog_get(&state, &headers, collection, &id)
        },
    )
    .patch(
        move |State(state): State<Shared>,
              headers: HeaderMap,
              Path(id): Path<String>,
              Json(body): Json<Value>| async move {
            catalog_update(&state, &headers, collection, &id, body)
        },
    )
    .delete(
        move |State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>| async move {
            catalog_flag(&state, &headers, collection, &id, Some(true))
        },
    )
}

fn catalog_restore(collection: &'static str) -> MethodRouter<Shared> {
    patch(
        move |State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>| async move {
            catalog_flag(&state, &headers, collection, &id, Some(false))
        },
    )
}

fn catalog_toggle(collection: &'static str) -> MethodRouter<Shared> {
    patch(
        move |State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>| async move {
            catalog_flag(&state, &headers, collection, &id, None)
        },
    )
}

// revoked server side: every list call is rejected
async fn list_services() -> Reply {
    fail(StatusCode::UNAUTHORIZED, "Token revoked")
}

// list answers 2xx with an unsuccessful envelope
async fn list_categories() -> Reply {
    fail(StatusCode::OK, "Maintenance window")
}

pub struct MockApi {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        {
            let mut seeded = state.lock().unwrap();
            seeded
                .branches
                .insert("b-1".to_string(), branch("b-1", "Centro"));
            seeded
                .catalog
                .insert(catalog_key("categories", "c-1"), category("c-1", "Hair"));
            seeded
                .catalog
                .insert(catalog_key("services", "s-1"), service("s-1", "Balayage"));
        }

        let app = Router::new()
            .route("/api/auth/admin/login", post(admin_login))
            .route("/api/auth/me", get(me))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/signup", post(signup))
            .route("/api/auth/verify-otp", post(verify_otp))
            .route("/api/auth/resend-otp", post(resend_otp))
            .route("/api/auth/verify-phone-otp", post(verify_phone_otp))
            .route("/api/auth/forgot-password", post(forgot_password))
            .route("/api/auth/verify-reset-otp", post(verify_reset_otp))
            .route("/api/auth/reset-password", post(reset_password))
            .route("/api/branches", get(list_branches).post(create_branch))
            .route("/api/branches/{id}", get(get_branch).delete(delete_branch))
            .route("/api/branches/{id}/restore", patch(restore_branch))
            .route("/api/branches/{id}/toggle-status", patch(toggle_branch))
            .route(
                "/api/branches/{id}/stylists",
                get(branch_stylists).post(assign_stylist),
            )
            .route(
                "/api/branches/{id}/stylists/{stylist_id}",
                delete(unassign_stylist),
            )
            .route(
                "/api/branches/{id}/stylists/{stylist_id}/change-branch",
                patch(change_stylist_branch),
            )
            .route("/api/admin/users/{id}/block", patch(block_user))
            .route("/api/admin/stylists", get(list_stylists))
            .route("/api/admin/stylists/invite", post(invite_stylist))
            .route("/api/admin/stylists/{id}/block", patch(block_stylist))
            .route("/api/admin/stylists/{id}/unblock", patch(unblock_stylist))
            .route("/api/stylist/invite/{token}", get(verify_invite))
            .route("/api/stylist/invite/{token}/accept", post(accept_invite))
            .route("/api/services", catalog_collection("services").get(list_services))
            .route("/api/services/{id}", catalog_item("services"))
            .route("/api/services/{id}/restore", catalog_restore("services"))
            .route("/api/services/{id}/toggle-status", catalog_toggle("services"))
            .route("/api/categories", catalog_collection("categories").get(list_categories))
            .route("/api/categories/{id}", catalog_item("categories"))
            .route("/api/categories/{id}/restore", catalog_restore("categories"))
            .route("/api/categories/{id}/toggle-status", catalog_toggle("categories"))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url()).with_timeout(5)
    }

    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> SalonClient {
        SalonClient::builder()
            .config(self.config())
            .token_store(tokens)
            .build()
            .expect("build client")
    }

    /// Client already holding a valid admin token
    pub fn admin_client(&self) -> SalonClient {
        self.client(Arc::new(MemoryTokenStore::with_token(ADMIN_TOKEN)))
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Method and raw path of the most recent request
    pub fn last_request(&self) -> Option<(String, String)> {
        self.state().requests.last().cloned()
    }
}
