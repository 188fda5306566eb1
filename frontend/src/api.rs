//! Backend client.
//!
//! Every request goes through [`ApiClient::call`]: the bearer token is read
//! from the session store, the redundant `/api` prefix is dropped (the
//! backend is mounted at the base address), and the response is mapped onto
//! [`ApiError`]. A 401 from any endpoint ends the local session and fires the
//! `on_unauthorized` hook; the shell subscribes to it and sends the user to
//! the login page. Every other failure is returned to the caller untouched.

use crate::config::{API_PREFIX, AppConfig};
use crate::session::{Session, SessionStore};
use crate::web::http::{
    FormField, GlooTransport, HttpRequest, HttpResponse, RequestBody, Transport, TransportError,
    UploadFile,
};
use kejaksaan_shared::protocol::{
    ApiRequest, CreateCaseRequest, CreateFolderRequest, CreateUserRequest, DeleteCaseRequest,
    DeleteEntryRequest, DeleteUserRequest, EntryKind, GetCaseRequest, GetProfileRequest,
    ListCasesRequest, ListFilesRequest, ListNotificationsRequest, ListUsersRequest,
    LogoutRequest, MarkNotificationReadRequest, UpdateCaseRequest, UpdateUserRequest,
    UploadAvatarRequest, UploadFileRequest,
};
use kejaksaan_shared::validation::{
    FieldErrors, validate_avatar, validate_case_draft, validate_folder_name, validate_login,
    validate_user_form,
};
use kejaksaan_shared::{
    Ack, CaseCategory, CaseDraft, CaseRecord, Envelope, FileListing, Id, LoginRequest,
    LoginResponse, Notification, Profile, ProfileUpdate, UserAccount, UserForm,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

/// Called after a 401 has cleared the session.
pub type AuthHook = Arc<dyn Fn() + Send + Sync>;

/// Client used by the views.
pub type Api = ApiClient<GlooTransport>;

// =========================================================
// Errors
// =========================================================

/// Everything a view can get back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401: token missing, expired or revoked.
    #[error("unauthorized")]
    Unauthorized(Option<String>),
    /// 403
    #[error("forbidden")]
    Forbidden(Option<String>),
    /// 404
    #[error("not found")]
    NotFound(Option<String>),
    /// Any other non-2xx status.
    #[error("backend returned {status}")]
    Backend { status: u16, message: Option<String> },
    /// 2xx carrying `success: false`, or a login without a token.
    #[error("request rejected")]
    Rejected(Option<String>),
    /// Caught before sending.
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Backend { status, message },
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Backend { status, .. } => *status,
            ApiError::Rejected(_) => 422,
            ApiError::Validation(_) => 400,
            ApiError::Network(_) => 503,
            ApiError::Timeout => 408,
            ApiError::Decode(_) => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "RESOURCE_NOT_FOUND",
            ApiError::Backend { .. } => "BACKEND_ERROR",
            ApiError::Rejected(_) => "REJECTED",
            ApiError::Validation(_) => "INVALID_INPUT",
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Decode(_) => "UNEXPECTED_RESPONSE",
        }
    }

    /// Message the server put in the body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Rejected(m)
            | ApiError::Backend { message: m, .. } => m.as_deref(),
            _ => None,
        }
    }

    /// Toast text: the server's message, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Unauthorized(_) => {
                "Sesi Anda telah berakhir. Silakan login kembali.".to_string()
            }
            ApiError::Forbidden(None) => "Anda tidak memiliki akses ke halaman ini".to_string(),
            _ => self.server_message().unwrap_or(fallback).to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout(_) => ApiError::Timeout,
            TransportError::Build(msg) | TransportError::Network(msg) => ApiError::Network(msg),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    // 204s and empty 200s decode like `null`.
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Form rejected before sending; carries the first failing field's message.
fn invalid(errors: FieldErrors) -> ApiError {
    ApiError::Validation(errors.first().unwrap_or_default().to_string())
}

fn ack(envelope: Ack) -> Result<(), ApiError> {
    envelope.into_result().map(|_| ()).map_err(ApiError::Rejected)
}

/// Drops a leading `/api` segment.
fn strip_api_prefix(path: &str) -> &str {
    match path.strip_prefix(API_PREFIX) {
        Some(rest) if rest.is_empty() => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

// =========================================================
// Client
// =========================================================

/// The one HTTP client every view goes through.
///
/// Attaches the bearer token from `session`, strips the duplicated `/api`
/// prefix and turns non-2xx responses into [`ApiError`].
#[derive(Clone)]
pub struct ApiClient<T> {
    /// No trailing slash.
    base_url: String,
    transport: T,
    /// Source of the bearer token; cleared on a 401.
    session: SessionStore,
    /// Called once per 401 after the session is cleared.
    on_unauthorized: Option<AuthHook>,
}

impl Api {
    /// Browser client for the configured backend.
    pub fn from_config(config: &AppConfig, session: SessionStore) -> Self {
        ApiClient::new(
            config.api_url.clone(),
            GlooTransport::new(config.request_timeout),
            session,
        )
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            on_unauthorized: None,
        }
    }

    /// Registers what to do after a 401 has cleared the session.
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, strip_api_prefix(path));
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    fn prepare<R: ApiRequest>(&self, request: &R) -> HttpRequest {
        let mut http = HttpRequest::new(R::METHOD, self.url(&request.path(), &request.query()))
            .header("Accept", "application/json");
        if let Some(token) = self.session.token() {
            http = http.header("Authorization", &format!("Bearer {token}"));
        }
        http
    }

    /// Sends a JSON request and decodes the typed response.
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let http = self.with_json_body(self.prepare(request), request)?;
        let response = self.execute(http, true).await?;
        decode(&response.body)
    }

    /// Sends `fields` as `multipart/form-data`.
    pub async fn call_multipart<R: ApiRequest>(
        &self,
        request: &R,
        fields: Vec<(String, FormField)>,
    ) -> Result<R::Response, ApiError> {
        let http = self.prepare(request).body(RequestBody::Multipart(fields));
        let response = self.execute(http, true).await?;
        decode(&response.body)
    }

    fn with_json_body<R: ApiRequest>(
        &self,
        http: HttpRequest,
        request: &R,
    ) -> Result<HttpRequest, ApiError> {
        match request.body() {
            Some(body) => {
                let json =
                    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(http
                    .header("Content-Type", "application/json")
                    .body(RequestBody::Json(json)))
            }
            None => Ok(http),
        }
    }

    /// `intercept_auth` is off only for the login call, where a 401 means
    /// wrong credentials rather than an expired session.
    async fn execute(
        &self,
        request: HttpRequest,
        intercept_auth: bool,
    ) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        log::debug!("[Api] {} {}", method.as_str(), url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("[Api] {} {} failed: {}", method.as_str(), url, e);
            ApiError::from(e)
        })?;

        log::debug!("[Api] {} {} -> {}", method.as_str(), url, response.status);
        if response.ok() {
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, server_message(&response.body));
        if intercept_auth && matches!(error, ApiError::Unauthorized(_)) {
            log::warn!("[Api] session rejected by backend, signing out");
            self.session.clear_session();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        } else {
            log::warn!(
                "[Api] {} {} -> {} {}",
                method.as_str(),
                url,
                error.status_code(),
                error.error_code()
            );
        }
        Err(error)
    }

    // --- Auth ---

    /// Exchanges credentials for a session. Does not store it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        validate_login(email, password).map_err(ApiError::Validation)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let http = self.with_json_body(self.prepare(&request), &request)?;
        let response = self.execute(http, false).await.map_err(|e| match e {
            ApiError::Unauthorized(message) => ApiError::Rejected(message),
            other => other,
        })?;
        let body: LoginResponse = decode(&response.body)?;

        match (body.token.filter(|t| !t.is_empty()), body.user) {
            (Some(token), Some(user)) => Ok(Session {
                token,
                role: user.role,
                username: Some(user.username).filter(|u| !u.is_empty()),
            }),
            _ => Err(ApiError::Rejected(None)),
        }
    }

    /// Best effort; callers end the local session regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.call(&LogoutRequest).await.map(|_| ())
    }

    // --- Profile ---

    /// Signed-in user's own profile.
    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.call(&GetProfileRequest).await
    }

    /// Returns the profile as stored after the update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.call(update).await
    }

    /// Checks size and type locally first; nothing is sent for a bad file.
    /// Returns the new avatar URL.
    pub async fn upload_avatar(&self, file: UploadFile) -> Result<String, ApiError> {
        validate_avatar(file.size, &file.mime).map_err(ApiError::Validation)?;

        let fields = vec![(UploadAvatarRequest::FIELD.to_string(), FormField::File(file))];
        let response = self.call_multipart(&UploadAvatarRequest, fields).await?;
        if !response.success {
            return Err(ApiError::Rejected(response.error));
        }
        response
            .avatar_url
            .ok_or_else(|| ApiError::Decode("avatar_url missing".to_string()))
    }

    // --- Cases ---

    /// Every case, or only those in `category`.
    pub async fn list_cases(
        &self,
        category: Option<CaseCategory>,
    ) -> Result<Vec<CaseRecord>, ApiError> {
        self.call(&ListCasesRequest { category }).await
    }

    pub async fn get_case(&self, id: &Id) -> Result<CaseRecord, ApiError> {
        self.call(&GetCaseRequest { id: id.clone() }).await
    }

    /// Creates a case in `category`, then re-fetches that category.
    pub async fn create_case_and_refresh(
        &self,
        mut draft: CaseDraft,
        category: CaseCategory,
    ) -> Result<Vec<CaseRecord>, ApiError> {
        validate_case_draft(&draft).map_err(invalid)?;
        draft.category = category.slug().to_string();

        self.call(&CreateCaseRequest { draft }).await?;
        self.list_cases(Some(category)).await
    }

    /// Updates a case, then re-fetches it.
    pub async fn update_case(&self, id: &Id, draft: CaseDraft) -> Result<CaseRecord, ApiError> {
        validate_case_draft(&draft).map_err(invalid)?;
        self.call(&UpdateCaseRequest {
            id: id.clone(),
            draft,
        })
        .await?;
        self.get_case(id).await
    }

    /// Permanent; the caller confirms first.
    pub async fn delete_case(&self, id: &Id) -> Result<(), ApiError> {
        self.call(&DeleteCaseRequest { id: id.clone() })
            .await
            .map(|_| ())
    }

    // --- Files ---

    /// Folder contents at `path`; empty string is the root.
    ///
    /// A `success: false` envelope becomes [`ApiError::Rejected`].
    pub async fn list_files(&self, path: &str) -> Result<FileListing, ApiError> {
        let envelope: Envelope<FileListing> = self
            .call(&ListFilesRequest {
                path: path.to_string(),
            })
            .await?;
        envelope
            .into_result()
            .map(Option::unwrap_or_default)
            .map_err(ApiError::Rejected)
    }

    /// `path` is omitted at the root folder.
    pub async fn upload_file(&self, file: UploadFile, path: &str) -> Result<(), ApiError> {
        let mut fields = vec![(
            UploadFileRequest::FILE_FIELD.to_string(),
            FormField::File(file),
        )];
        if !path.is_empty() {
            fields.push((
                UploadFileRequest::PATH_FIELD.to_string(),
                FormField::Text(path.to_string()),
            ));
        }
        ack(self.call_multipart(&UploadFileRequest, fields).await?)
    }

    /// Rejects a blank name locally. The name is trimmed before sending.
    pub async fn create_folder(&self, name: &str, path: &str) -> Result<(), ApiError> {
        validate_folder_name(name).map_err(ApiError::Validation)?;
        ack(self
            .call(&CreateFolderRequest {
                name: name.trim().to_string(),
                path: path.to_string(),
            })
            .await?)
    }

    /// Deletes a file or a folder, depending on `kind`.
    pub async fn delete_entry(&self, kind: EntryKind, id: &Id) -> Result<(), ApiError> {
        ack(self
            .call(&DeleteEntryRequest {
                kind,
                id: id.clone(),
            })
            .await?)
    }

    // --- Users ---

    /// Admin only.
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.call(&ListUsersRequest).await
    }

    /// Creates when `id` is `None`, otherwise updates. An empty password
    /// on update keeps the stored one.
    pub async fn save_user(&self, id: Option<&Id>, form: UserForm) -> Result<(), ApiError> {
        validate_user_form(&form, id.is_none()).map_err(invalid)?;
        match id {
            None => self.call(&CreateUserRequest { form }).await.map(|_| ()),
            Some(id) => self
                .call(&UpdateUserRequest {
                    id: id.clone(),
                    form: form.without_blank_password(),
                })
                .await
                .map(|_| ()),
        }
    }

    /// Fails with [`ApiError::Rejected`] unless the backend acks.
    pub async fn delete_user(&self, id: &Id) -> Result<(), ApiError> {
        ack(self.call(&DeleteUserRequest { id: id.clone() }).await?)
    }

    // --- Notifications ---

    /// Current user's notifications, in backend order.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.call(&ListNotificationsRequest).await
    }

    pub async fn mark_notification_read(&self, id: &Id) -> Result<(), ApiError> {
        self.call(&MarkNotificationReadRequest { id: id.clone() })
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests;
