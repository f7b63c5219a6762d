use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::requests::{
    MessageResponse, ProjectRequest, SignInRequest, SignUpRequest, TaskRequest, validate_progress,
};
use crate::model::config::ApiConfig;
use crate::model::project::Project;
use crate::model::status::{StatusEnum, TaskStatus};
use crate::model::task::Task;
use crate::model::user::{EntityId, Session, UserSummary};

/// Client for the tracker backend's REST API.
///
/// Each call is a single request: no retries, no caching. When a session
/// is attached its token is sent as a bearer credential on every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Option<Session>) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Same client, carrying `session` from now on
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let url = Url::parse(&url).map_err(|_| ApiError::InvalidUrl(url.clone()))?;
        log::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        Ok(match &self.session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        })
    }

    /// Send and map the status: 401 is `Unauthorized`, other failures carry
    /// the backend's message when it sent one.
    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{} rejected the session (401)", path);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = serde_json::from_slice::<MessageResponse>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| {
                    let text = String::from_utf8_lossy(&body).trim().to_string();
                    if text.is_empty() {
                        status.canonical_reason().unwrap_or("error").to_string()
                    } else {
                        text
                    }
                });
            log::warn!("{} failed with {}: {}", path, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn ErasedBody + Sync)>,
    ) -> Result<T, ApiError> {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = body.attach(builder);
        }
        let bytes = self.execute(builder, path).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(Method::GET, path, None).await
    }

    /// Send a request whose response body is irrelevant
    async fn send_ignoring_body(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn ErasedBody + Sync)>,
    ) -> Result<(), ApiError> {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = body.attach(builder);
        }
        self.execute(builder, path).await.map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let body = SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.fetch(Method::POST, "/api/auth/signin", Some(&body)).await
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        request.validate()?;
        self.send_ignoring_body(Method::POST, "/api/auth/signup", Some(request))
            .await
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn current_user_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/api/projects/user").await
    }

    pub async fn all_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/api/projects").await
    }

    pub async fn project_by_id(&self, id: EntityId) -> Result<Project, ApiError> {
        self.get(&format!("/api/projects/{}", id)).await
    }

    pub async fn create_project(&self, request: &ProjectRequest) -> Result<Project, ApiError> {
        request.validate()?;
        self.fetch(Method::POST, "/api/projects", Some(request)).await
    }

    pub async fn update_project(
        &self,
        id: EntityId,
        request: &ProjectRequest,
    ) -> Result<Project, ApiError> {
        request.validate()?;
        self.fetch(Method::PUT, &format!("/api/projects/{}", id), Some(request))
            .await
    }

    pub async fn delete_project(&self, id: EntityId) -> Result<(), ApiError> {
        self.send_ignoring_body(Method::DELETE, &format!("/api/projects/{}", id), None)
            .await
    }

    pub async fn add_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, ApiError> {
        let path = format!("/api/projects/{}/members/{}", project_id, user_id);
        self.fetch(Method::POST, &path, None).await
    }

    pub async fn remove_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, ApiError> {
        let path = format!("/api/projects/{}/members/{}", project_id, user_id);
        self.fetch(Method::DELETE, &path, None).await
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub async fn all_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get("/api/tasks").await
    }

    pub async fn assigned_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get("/api/tasks/assigned").await
    }

    pub async fn tasks_by_project(&self, project_id: EntityId) -> Result<Vec<Task>, ApiError> {
        self.get(&format!("/api/tasks/project/{}", project_id)).await
    }

    pub async fn task_by_id(&self, id: EntityId) -> Result<Task, ApiError> {
        self.get(&format!("/api/tasks/{}", id)).await
    }

    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task, ApiError> {
        request.validate()?;
        self.fetch(Method::POST, "/api/tasks", Some(request)).await
    }

    pub async fn update_task(&self, id: EntityId, request: &TaskRequest) -> Result<Task, ApiError> {
        request.validate()?;
        self.fetch(Method::PUT, &format!("/api/tasks/{}", id), Some(request))
            .await
    }

    pub async fn delete_task(&self, id: EntityId) -> Result<(), ApiError> {
        self.send_ignoring_body(Method::DELETE, &format!("/api/tasks/{}", id), None)
            .await
    }

    pub async fn update_task_status(
        &self,
        id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let path = format!("/api/tasks/{}/status?status={}", id, status.token());
        self.fetch(Method::PATCH, &path, None).await
    }

    pub async fn update_task_progress(&self, id: EntityId, progress: u8) -> Result<Task, ApiError> {
        validate_progress(progress)?;
        let path = format!("/api/tasks/{}/progress?progress={}", id, progress);
        self.fetch(Method::PATCH, &path, None).await
    }

    pub async fn assign_task(&self, id: EntityId, user_id: EntityId) -> Result<Task, ApiError> {
        let path = format!("/api/tasks/{}/assign/{}", id, user_id);
        self.fetch(Method::PATCH, &path, None).await
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn all_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get("/api/users").await
    }

    pub async fn user_by_id(&self, id: EntityId) -> Result<UserSummary, ApiError> {
        self.get(&format!("/api/users/{}", id)).await
    }

    pub async fn current_user(&self) -> Result<UserSummary, ApiError> {
        self.get("/api/users/me").await
    }
}

/// Object-safe view of a JSON request body
trait ErasedBody {
    fn attach(&self, builder: RequestBuilder) -> RequestBuilder;
}

impl<T: Serialize> ErasedBody for T {
    fn attach(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.json(self)
    }
}
