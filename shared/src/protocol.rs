use crate::{
    Ack, AvatarUploadResponse, CaseCategory, CaseDraft, CaseRecord, Envelope, FileListing, Id,
    LoginRequest, LoginResponse, Notification, Profile, ProfileUpdate, UserAccount, UserForm,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are written the way the backend documents them (`/api/...`); the
/// client decides whether the prefix survives.
pub trait ApiRequest {
    /// JSON body type. `()` for body-less calls.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, including any record id.
    fn path(&self) -> String;

    /// Query string pairs.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Auth & Profile
// =========================================================

impl ApiRequest for LoginRequest {
    type Body = LoginRequest;
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/logout".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Body = ();
    type Response = Profile;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/profile".to_string()
    }
}

impl ApiRequest for ProfileUpdate {
    type Body = ProfileUpdate;
    type Response = Profile;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/api/profile".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Multipart avatar upload; the form itself is attached by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadAvatarRequest;

impl UploadAvatarRequest {
    pub const FIELD: &'static str = "avatar";
}

impl ApiRequest for UploadAvatarRequest {
    type Body = ();
    type Response = AvatarUploadResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/profile/avatar".to_string()
    }
}

// =========================================================
// Cases
// =========================================================

/// List cases, optionally restricted to one category.
#[derive(Debug, Clone, Default)]
pub struct ListCasesRequest {
    pub category: Option<CaseCategory>,
}

impl ApiRequest for ListCasesRequest {
    type Body = ();
    type Response = Vec<CaseRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/cases".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.category
            .map(|c| vec![("type", c.slug().to_string())])
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GetCaseRequest {
    pub id: Id,
}

impl ApiRequest for GetCaseRequest {
    type Body = ();
    type Response = CaseRecord;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/cases/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateCaseRequest {
    pub draft: CaseDraft,
}

impl ApiRequest for CreateCaseRequest {
    type Body = CaseDraft;
    type Response = CaseRecord;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/cases".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.draft)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCaseRequest {
    pub id: Id,
    pub draft: CaseDraft,
}

impl ApiRequest for UpdateCaseRequest {
    type Body = CaseDraft;
    type Response = CaseRecord;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/cases/{}", self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.draft)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCaseRequest {
    pub id: Id,
}

impl ApiRequest for DeleteCaseRequest {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/cases/{}", self.id)
    }
}

// =========================================================
// Files
// =========================================================

/// List one folder. `path` is the folder stack joined by `/`; empty for the root.
#[derive(Debug, Clone, Default)]
pub struct ListFilesRequest {
    pub path: String,
}

impl ApiRequest for ListFilesRequest {
    type Body = ();
    type Response = Envelope<FileListing>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/files".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("path", self.path.clone())]
    }
}

/// Multipart file upload; fields `file` and (outside the root) `path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadFileRequest;

impl UploadFileRequest {
    pub const FILE_FIELD: &'static str = "file";
    pub const PATH_FIELD: &'static str = "path";
}

impl ApiRequest for UploadFileRequest {
    type Body = ();
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/files/upload".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderRequest {
    pub name: String,
    pub path: String,
}

impl ApiRequest for CreateFolderRequest {
    type Body = CreateFolderRequest;
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/files/folders".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    fn segment(&self) -> &'static str {
        match self {
            EntryKind::File => "files",
            EntryKind::Folder => "folders",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteEntryRequest {
    pub kind: EntryKind,
    pub id: Id,
}

impl ApiRequest for DeleteEntryRequest {
    type Body = ();
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/files/{}/{}", self.kind.segment(), self.id)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Body = ();
    type Response = Vec<UserAccount>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub form: UserForm,
}

impl ApiRequest for CreateUserRequest {
    type Body = UserForm;
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/users".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.form)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub id: Id,
    pub form: UserForm,
}

impl ApiRequest for UpdateUserRequest {
    type Body = UserForm;
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.form)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteUserRequest {
    pub id: Id,
}

impl ApiRequest for DeleteUserRequest {
    type Body = ();
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

// =========================================================
// Notifications
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListNotificationsRequest;

impl ApiRequest for ListNotificationsRequest {
    type Body = ();
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/notifications".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct MarkNotificationReadRequest {
    pub id: Id,
}

impl ApiRequest for MarkNotificationReadRequest {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/notifications/{}/read", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_cases_filters_by_type_only_when_given() {
        let all = ListCasesRequest::default();
        assert!(all.query().is_empty());

        let one = ListCasesRequest {
            category: Some(CaseCategory::Penyidikan),
        };
        assert_eq!(one.query(), vec![("type", "penyidikan".to_string())]);
        assert_eq!(ListCasesRequest::METHOD, HttpMethod::Get);
    }

    #[test]
    fn delete_entry_targets_kind_segment() {
        let file = DeleteEntryRequest {
            kind: EntryKind::File,
            id: Id::from(7),
        };
        let folder = DeleteEntryRequest {
            kind: EntryKind::Folder,
            id: Id::from("x"),
        };
        assert_eq!(file.path(), "/api/files/files/7");
        assert_eq!(folder.path(), "/api/files/folders/x");
    }

    #[test]
    fn record_paths_embed_ids() {
        assert_eq!(GetCaseRequest { id: Id::from(3) }.path(), "/api/cases/3");
        assert_eq!(
            MarkNotificationReadRequest { id: Id::from(9) }.path(),
            "/api/notifications/9/read"
        );
        assert_eq!(UpdateUserRequest::METHOD, HttpMethod::Put);
    }
}
