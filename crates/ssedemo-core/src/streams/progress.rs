// Simulated task progress: "progress" for steps 0..=PROGRESS_TOTAL_STEPS

use chrono::Utc;
use futures::stream::{self, Stream};

use super::pace;
use crate::config::{StreamConfig, PROGRESS_TOTAL_STEPS};
use crate::connection::ClientConnection;
use crate::event::{StreamEvent, EVENT_PROGRESS};
use crate::schemas::{ProgressUpdate, TaskStatus};

/// Stream progress updates for a named task
pub fn progress_stream(
    task_name: &str,
    connection: ClientConnection,
    config: &StreamConfig,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    let task_name = task_name.to_string();
    let task_id = format!("task_{}", Utc::now().timestamp());
    let interval = config.progress_interval;

    tracing::debug!(task_id = %task_id, task_name = %task_name, "Starting progress stream");

    stream::unfold(0u32, move |step| {
        let connection = connection.clone();
        let update = progress_update(&task_id, &task_name, step);
        async move {
            if step > PROGRESS_TOTAL_STEPS {
                return None;
            }

            pace(step as usize, interval).await;

            if connection.is_disconnected() {
                tracing::debug!(step, "Client disconnected, stopping progress stream");
                return None;
            }

            if update.status == TaskStatus::Completed {
                tracing::info!(task_id = %update.task_id, "Progress stream completed");
            }

            match StreamEvent::json(EVENT_PROGRESS, step, &update) {
                Ok(event) => Some((event, step + 1)),
                Err(e) => {
                    tracing::error!("Failed to encode progress event: {}", e);
                    None
                }
            }
        }
    })
}

fn progress_update(task_id: &str, task_name: &str, step: u32) -> ProgressUpdate {
    let status = if step < PROGRESS_TOTAL_STEPS {
        TaskStatus::InProgress
    } else {
        TaskStatus::Completed
    };

    ProgressUpdate {
        task_id: task_id.to_string(),
        progress: (step * 100 / PROGRESS_TOTAL_STEPS).min(100) as u8,
        status,
        message: Some(format!(
            "Processing {} - Step {}/{}",
            task_name, step, PROGRESS_TOTAL_STEPS
        )),
    }
}
