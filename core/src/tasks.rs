//! CRUD operations on the authenticated user's tasks.
//!
//! Every call needs a session token; without one it fails with
//! `ApiError::Unauthenticated` and nothing is sent. Nothing is cached, so each
//! read goes back to the server.

use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::RequestHelper;
use crate::types::{NewTask, Task, TaskUpdate};

const LIST_FAILED: &str = "Erreur de chargement des tâches";
const GET_FAILED: &str = "Erreur de chargement de la tâche";
const CREATE_FAILED: &str = "Erreur de création de la tâche";
const UPDATE_FAILED: &str = "Erreur de mise à jour de la tâche";
const DELETE_FAILED: &str = "Erreur de suppression de la tâche";

#[derive(Debug, Clone)]
pub struct TaskClient {
    helper: RequestHelper,
}

impl TaskClient {
    pub fn new(helper: RequestHelper) -> Self {
        Self { helper }
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        let request = self
            .helper
            .build::<()>(HttpMethod::Get, "/tache/get", None, true)?;
        self.helper.send_json(request, LIST_FAILED).await
    }

    pub async fn get(&self, id: i64) -> Result<Task> {
        let request = self
            .helper
            .build::<()>(HttpMethod::Get, &format!("/tache/{id}"), None, true)?;
        self.helper.send_json(request, GET_FAILED).await
    }

    pub async fn create(&self, input: &NewTask) -> Result<Task> {
        let request = self
            .helper
            .build(HttpMethod::Post, "/tache/create", Some(input), true)?;
        input.validate()?;
        let task: Task = self.helper.send_json(request, CREATE_FAILED).await?;
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    /// Apply the fields present in `changes` and return the full updated task.
    pub async fn update(&self, id: i64, changes: &TaskUpdate) -> Result<Task> {
        let request = self
            .helper
            .build(HttpMethod::Put, &format!("/tache/{id}"), Some(changes), true)?;
        self.helper.send_json(request, UPDATE_FAILED).await
    }

    /// Flip the completion flag of `task`.
    pub async fn toggle(&self, task: &Task) -> Result<Task> {
        self.update(task.id, &TaskUpdate::complete(!task.complete))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let request = self
            .helper
            .build::<()>(HttpMethod::Delete, &format!("/tache/{id}"), None, true)?;
        self.helper.send_empty(request, DELETE_FAILED).await?;
        tracing::debug!(id, "task deleted");
        Ok(())
    }
}
