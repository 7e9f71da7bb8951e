use parking_lot::RwLock;
use sched_core::{SolveEnvelope, SolveResult, Solver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status")]
pub enum JobStatus {
    Queued,
    Running,
    Solved { result: SolveResult },
    Failed { message: String },
}

/// Timetable jobs kept in memory for the lifetime of the process.
#[derive(Clone)]
pub struct InMemJobs<S: Solver> {
    inner: Arc<RwLock<HashMap<String, JobStatus>>>,
    solver: Arc<S>,
}

impl<S: Solver> InMemJobs<S> {
    pub fn new(solver: S) -> Self {
        Self {
            inner: Default::default(),
            solver: Arc::new(solver),
        }
    }

    /// Registers the job and starts it on the Tokio runtime; must be called
    /// from within one.
    pub fn enqueue(&self, env: SolveEnvelope) -> JobId {
        let id = Uuid::new_v4().to_string();
        self.inner.write().insert(id.clone(), JobStatus::Queued);

        let map = self.inner.clone();
        let solver = self.solver.clone();
        let id_for_task = id.clone();

        tokio::spawn(async move {
            map.write().insert(id_for_task.clone(), JobStatus::Running);
            match solver.solve(env).await {
                Ok(res) => {
                    info!(job = %id_for_task, fitness = res.fitness, "job solved");
                    map.write()
                        .insert(id_for_task, JobStatus::Solved { result: res });
                }
                Err(e) => {
                    error!(?e, job = %id_for_task, "job failed");
                    map.write().insert(
                        id_for_task,
                        JobStatus::Failed {
                            message: e.to_string(),
                        },
                    );
                }
            }
        });

        JobId(id)
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().get(id).cloned()
    }
}
