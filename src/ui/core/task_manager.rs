use super::actions::Action;
use super::operations::{self, Submission};
use crate::auth::TokenStore;
use crate::backend::{ClaimsBackend, ClaimsQuery};
use crate::constants::{ERROR_DELETE_FAILED, ERROR_SAVE_FAILED};
use crate::forms::{ChangePasswordForm, FieldErrors};
use crate::routes::Route;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Data for a route; aborted when the user navigates away.
    PageLoad(Route),
    /// A create/update/delete or auth call; always runs to completion.
    Submission,
}

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn register(&mut self, kind: TaskKind, description: String, handle: JoinHandle<()>) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            kind,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };
        self.tasks.insert(task_id, task);
        task_id
    }

    /// Spawn the load for `route`. The result comes back tagged with the route.
    pub fn spawn_page_load(&mut self, backend: Arc<dyn ClaimsBackend>, route: Route, query: ClaimsQuery) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Load {}", route);
        let task_route = route.clone();

        let handle = tokio::spawn(async move {
            let action = match operations::load_page(backend.as_ref(), &task_route, &query).await {
                Ok(Some(data)) => Action::PageLoaded {
                    route: task_route,
                    data,
                },
                Ok(None) => Action::None,
                Err(error) => Action::PageLoadFailed {
                    route: task_route,
                    error,
                },
            };
            let _ = action_sender.send(action);
        });

        self.register(TaskKind::PageLoad(route), description, handle)
    }

    /// Spawn a write. Success and failure are both reported as actions.
    pub fn spawn_submission(
        &mut self,
        backend: Arc<dyn ClaimsBackend>,
        tokens: TokenStore,
        submission: Submission,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = submission.description();
        let is_password_change = matches!(submission, Submission::ChangePassword(_));
        let failure_prefix = if matches!(submission, Submission::DeleteClaim(_)) {
            ERROR_DELETE_FAILED
        } else {
            ERROR_SAVE_FAILED
        };
        let desc_for_task = description.clone();

        let handle = tokio::spawn(async move {
            let action = match operations::submit(backend.as_ref(), &tokens, submission).await {
                Ok(outcome) => Action::SubmitSucceeded {
                    message: outcome.message,
                    next: outcome.next,
                },
                Err(error) => {
                    log::warn!("{} failed: {}", desc_for_task, error);
                    let field_errors = if is_password_change {
                        ChangePasswordForm::field_errors_for(&error)
                    } else {
                        FieldErrors::new()
                    };
                    Action::SubmitFailed {
                        message: format!("{}: {}", failure_prefix, error),
                        field_errors,
                    }
                }
            };
            let _ = action_sender.send(action);
        });

        self.register(TaskKind::Submission, description, handle)
    }

    /// Abort every in-flight page load; returns how many were aborted.
    pub fn cancel_page_loads(&mut self) -> usize {
        let page_loads: Vec<TaskId> = self
            .tasks
            .values()
            .filter(|task| matches!(task.kind, TaskKind::PageLoad(_)))
            .map(|task| task.id)
            .collect();

        for task_id in &page_loads {
            if let Some(task) = self.tasks.remove(task_id) {
                task.handle.abort();
            }
        }
        page_loads.len()
    }

    /// Drop finished tasks, returning their descriptions
    pub fn cleanup_finished_tasks(&mut self) -> Vec<String> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        finished
            .into_iter()
            .filter_map(|task_id| self.tasks.remove(&task_id))
            .map(|task| format!("{} ({} ms)", task.description, task.started_at.elapsed().as_millis()))
            .collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.tasks.values().any(|task| task.kind == TaskKind::Submission)
    }

    pub fn is_loading(&self, route: &Route) -> bool {
        self.tasks
            .values()
            .any(|task| matches!(&task.kind, TaskKind::PageLoad(r) if r == route))
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
