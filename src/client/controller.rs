use super::{ApiClient, ClientError};
use crate::models::Task;

pub const MISSING_CREDENTIALS: &str = "Both username and password are required.";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Fields of the login view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

/// Everything a view needs to render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub logged_in: bool,
    pub tasks: Vec<Task>,
    /// Text of the "new task" input.
    pub draft: String,
    pub login: LoginForm,
}

/// Drives the client: owns the view state and applies user actions to it.
///
/// Each action sends one request and waits for it. Successful mutations are
/// followed by a full re-fetch of the list; nothing is applied optimistically.
pub struct TodoController {
    client: ApiClient,
    state: ViewState,
}

impl TodoController {
    /// Starts on the login view, whatever the token store holds.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.state.login
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    /// Picks up a previously stored token, if the server still accepts it.
    pub async fn resume(&mut self) {
        if self.client.tokens().load().is_some() {
            self.state.logged_in = true;
            self.refresh().await;
        }
    }

    pub async fn submit_login(&mut self) {
        let LoginForm {
            username, password, ..
        } = self.state.login.clone();

        if username.is_empty() || password.is_empty() {
            self.state.login.error = Some(MISSING_CREDENTIALS.to_string());
            return;
        }

        match self.client.login(&username, &password).await {
            Ok(_) => {
                self.state.login = LoginForm::default();
                self.state.logged_in = true;
                self.refresh().await;
            }
            Err(e) => {
                log::debug!("login failed: {}", e);
                self.state.login = LoginForm {
                    error: Some(LOGIN_FAILED.to_string()),
                    ..LoginForm::default()
                };
            }
        }
    }

    /// Re-fetches the list. Any failure drops back to the login view, with no
    /// message shown.
    pub async fn refresh(&mut self) {
        match self.client.get_tasks().await {
            Ok(tasks) => self.state.tasks = tasks,
            Err(e) => {
                log::debug!("task fetch failed, logging out: {}", e);
                self.state.logged_in = false;
                self.state.tasks.clear();
            }
        }
    }

    /// Adds the draft as a new task.
    pub async fn create(&mut self) -> Result<(), ClientError> {
        let name = self.state.draft.clone();
        self.client.add_task(&name).await?;
        self.state.draft.clear();
        self.refresh().await;
        Ok(())
    }

    pub async fn set_completed(&mut self, id: i32, is_complete: bool) -> Result<(), ClientError> {
        let name = self
            .state
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.name.clone())
            .ok_or(ClientError::UnknownTask(id))?;
        self.client.set_completed(id, is_complete, &name).await?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes a task. A repeated delete comes back as a 404 error.
    pub async fn remove(&mut self, id: i32) -> Result<(), ClientError> {
        self.client.delete_task(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.client.logout()?;
        self.state = ViewState::default();
        Ok(())
    }
}
