use super::*;
use crate::session::{ROLE_KEY, TOKEN_KEY};
use crate::web::storage::{MemoryStorage, Storage};
use async_trait::async_trait;
use kejaksaan_shared::Role;
use kejaksaan_shared::protocol::HttpMethod;
use kejaksaan_shared::view_model::CaseRow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// =========================================================
// Mock transport
// =========================================================

#[derive(Clone, Default)]
struct MockTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    fn fail(&self, error: TransportError) -> &Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no reply queued".to_string())))
    }
}

const BASE: &str = "https://api.test";

struct Harness {
    api: ApiClient<MockTransport>,
    transport: MockTransport,
    persistent: MemoryStorage,
    expired: Arc<AtomicUsize>,
}

fn harness(signed_in: bool) -> Harness {
    let persistent = MemoryStorage::new();
    let transient = MemoryStorage::new();
    let session = SessionStore::new(Arc::new(persistent.clone()), Arc::new(transient));
    if signed_in {
        session.set_session(&Session {
            token: "tok-1".to_string(),
            role: Role::User,
            username: Some("budi".to_string()),
        });
    }

    let transport = MockTransport::default();
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = expired.clone();
    let api = ApiClient::new(BASE, transport.clone(), session).on_unauthorized(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    Harness {
        api,
        transport,
        persistent,
        expired,
    }
}

fn body_json(request: &HttpRequest) -> serde_json::Value {
    match &request.body {
        RequestBody::Json(json) => serde_json::from_str(json).unwrap(),
        other => panic!("expected JSON body, got {other:?}"),
    }
}

// =========================================================
// Request shaping
// =========================================================

#[test]
fn test_strip_api_prefix() {
    assert_eq!(strip_api_prefix("/api/cases"), "/cases");
    assert_eq!(strip_api_prefix("/api"), "/");
    assert_eq!(strip_api_prefix("/apis/x"), "/apis/x");
    assert_eq!(strip_api_prefix("/cases"), "/cases");
}

#[tokio::test]
async fn test_bearer_token_and_prefix_strip() {
    let h = harness(true);
    h.transport.reply(200, "[]");

    h.api.list_cases(Some(CaseCategory::Penyidikan)).await.unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].url, "https://api.test/cases?type=penyidikan");
    assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let h = harness(false);
    h.transport.reply(200, "[]");

    h.api.list_notifications().await.unwrap();

    assert_eq!(h.transport.sent()[0].header_value("authorization"), None);
}

// =========================================================
// Failure mapping
// =========================================================

#[tokio::test]
async fn test_401_clears_session_and_notifies_once() {
    let h = harness(true);
    h.transport.reply(401, r#"{"error":"Token expired"}"#);

    let err = h.api.get_profile().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert_eq!(h.expired.load(Ordering::SeqCst), 1);
    assert!(h.persistent.get(TOKEN_KEY).is_none());
    assert!(h.persistent.get(ROLE_KEY).is_none());
    assert!(!h.api.session().is_marked_active());
}

#[tokio::test]
async fn test_other_failures_are_left_to_the_caller() {
    let h = harness(true);
    h.transport.reply(500, r#"{"error":"Database down"}"#);
    h.transport.reply(404, "");

    let err = h.api.list_users().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Backend {
            status: 500,
            message: Some("Database down".to_string())
        }
    );
    assert_eq!(err.user_message("Gagal mengambil data pengguna"), "Database down");

    let err = h.api.get_case(&Id::from(9)).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound(None));
    assert_eq!(err.user_message("Gagal memuat kasus"), "Gagal memuat kasus");

    assert_eq!(h.expired.load(Ordering::SeqCst), 0);
    assert!(h.persistent.get(TOKEN_KEY).is_some());
}

#[tokio::test]
async fn test_transport_failures_use_fallback_message() {
    let h = harness(true);
    h.transport
        .fail(TransportError::Timeout(Duration::from_millis(5_000)))
        .fail(TransportError::Network("offline".to_string()));

    let err = h.api.list_cases(None).await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
    assert_eq!(err.user_message("Terjadi kesalahan"), "Terjadi kesalahan");

    let err = h.api.list_cases(None).await.unwrap_err();
    assert_eq!(err.error_code(), "NETWORK_ERROR");
}

// =========================================================
// Operations
// =========================================================

#[tokio::test]
async fn test_create_case_then_refetch_shows_one_row() {
    let h = harness(true);
    h.transport
        .reply(201, r#"{"id":1,"title":"A","date":"2024-01-01","type":"penyidikan"}"#)
        .reply(200, r#"[{"id":1,"title":"A","date":"2024-01-01","type":"penyidikan"}]"#);

    let draft = CaseDraft {
        title: "A".to_string(),
        date: "2024-01-01".to_string(),
        ..CaseDraft::default()
    };
    let cases = h
        .api
        .create_case_and_refresh(draft, CaseCategory::Penyidikan)
        .await
        .unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].url, "https://api.test/cases");
    let body = body_json(&sent[0]);
    assert_eq!(body["title"], "A");
    assert_eq!(body["type"], "penyidikan");
    assert_eq!(sent[1].url, "https://api.test/cases?type=penyidikan");

    let rows: Vec<CaseRow> = cases.iter().map(CaseRow::from).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "A");
    assert_eq!(rows[0].date_label, "1 Januari 2024");
    assert_eq!(rows[0].status, "Menunggu");
}

#[tokio::test]
async fn test_invalid_case_draft_sends_nothing() {
    let h = harness(true);
    let err = h
        .api
        .create_case_and_refresh(CaseDraft::default(), CaseCategory::Eksekusi)
        .await
        .unwrap_err();
    // Fields are reported in key order, so `date` comes before `title`.
    assert_eq!(err, ApiError::Validation("Tanggal harus diisi".to_string()));
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_oversized_avatar_rejected_before_network() {
    let h = harness(true);
    let file = UploadFile::detached("me.png", 6 * 1024 * 1024, "image/png");

    let err = h.api.upload_avatar(file).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Validation("Ukuran file terlalu besar (maksimal 5MB)".to_string())
    );
    assert!(h.transport.sent().is_empty());
    assert!(h.api.session().avatar().is_none());
}

#[tokio::test]
async fn test_login_returns_session_without_storing_it() {
    let h = harness(false);
    h.transport
        .reply(200, r#"{"token":"new","user":{"role":"admin","username":"jaksa"}}"#);

    let session = h.api.login("jaksa@kejari.go.id", "rahasia").await.unwrap();

    assert_eq!(session.token, "new");
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.username.as_deref(), Some("jaksa"));
    assert!(h.persistent.get(TOKEN_KEY).is_none());

    let body = body_json(&h.transport.sent()[0]);
    assert_eq!(body["email"], "jaksa@kejari.go.id");
    assert_eq!(h.transport.sent()[0].url, "https://api.test/auth/login");
}

#[tokio::test]
async fn test_login_failures_are_rejections() {
    let h = harness(false);
    h.transport
        .reply(401, r#"{"error":"Password salah"}"#)
        .reply(200, r#"{"user":{"role":"user","username":"x"}}"#);

    let err = h.api.login("a@b.c", "x").await.unwrap_err();
    assert_eq!(err, ApiError::Rejected(Some("Password salah".to_string())));
    assert_eq!(h.expired.load(Ordering::SeqCst), 0);

    let err = h.api.login("a@b.c", "x").await.unwrap_err();
    assert_eq!(err.user_message("Email atau password salah"), "Email atau password salah");

    let err = h.api.login("", "x").await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Silakan isi email dan password".to_string()));
    assert_eq!(h.transport.sent().len(), 2);
}

#[tokio::test]
async fn test_file_envelope_failure_surfaces_server_error() {
    let h = harness(true);
    h.transport
        .reply(200, r#"{"success":false,"error":"Folder tidak ditemukan"}"#)
        .reply(200, r#"{"success":true,"data":{"files":[],"folders":[{"id":2,"name":"BAP"}]}}"#);

    let err = h.api.list_files("hilang").await.unwrap_err();
    assert_eq!(err.user_message("Gagal memuat file"), "Folder tidak ditemukan");

    let listing = h.api.list_files("").await.unwrap();
    assert_eq!(listing.folders[0].name, "BAP");
    assert_eq!(h.transport.sent()[1].url, "https://api.test/files?path=");
}

#[tokio::test]
async fn test_upload_file_omits_path_at_root() {
    let h = harness(true);
    h.transport
        .reply(200, r#"{"success":true}"#)
        .reply(200, r#"{"success":true}"#);

    h.api
        .upload_file(UploadFile::detached("a.pdf", 10, "application/pdf"), "")
        .await
        .unwrap();
    h.api
        .upload_file(UploadFile::detached("b.pdf", 10, "application/pdf"), "BAP/2024")
        .await
        .unwrap();

    let names = |r: &HttpRequest| match &r.body {
        RequestBody::Multipart(fields) => fields.iter().map(|(n, _)| n.clone()).collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    let sent = h.transport.sent();
    assert_eq!(names(&sent[0]), vec!["file"]);
    assert_eq!(names(&sent[1]), vec!["file", "path"]);
    assert_eq!(sent[0].header_value("Content-Type"), None);
}

#[tokio::test]
async fn test_save_user_edit_drops_blank_password() {
    let h = harness(true);
    h.transport.reply(200, "{}");

    let form = UserForm {
        username: "sari".to_string(),
        email: "sari@kejari.go.id".to_string(),
        password: Some(String::new()),
        ..UserForm::default()
    };
    h.api.save_user(Some(&Id::from(4)), form.clone()).await.unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Put);
    assert_eq!(sent[0].url, "https://api.test/users/4");
    assert!(body_json(&sent[0]).get("password").is_none());

    let err = h.api.save_user(None, form).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation("Password harus diisi untuk pengguna baru".to_string())
    );
    assert_eq!(h.transport.sent().len(), 1);
}

#[tokio::test]
async fn test_delete_user_checks_success_flag() {
    let h = harness(true);
    h.transport
        .reply(200, r#"{"success":false,"error":"Pengguna masih memiliki kasus"}"#);

    let err = h.api.delete_user(&Id::from(3)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected(Some("Pengguna masih memiliki kasus".to_string()))
    );
}
