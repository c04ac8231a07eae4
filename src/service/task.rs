//! Task progress reporting.

use std::fmt;
use std::time::Duration;

/// A progress notification emitted while a task runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Started { task: String },
    Initializing,
    LoadingDependencies,
    Running,
    Completed { task: String },
}

impl fmt::Display for TaskEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskEvent::Started { task } => write!(f, "Starting task: {}", task),
            TaskEvent::Initializing => write!(f, "Initializing environment..."),
            TaskEvent::LoadingDependencies => write!(f, "Loading dependencies..."),
            TaskEvent::Running => write!(f, "Running task..."),
            TaskEvent::Completed { task } => write!(f, "Task {} completed successfully.", task),
        }
    }
}

/// Receives task progress events in order.
pub trait TaskObserver: Send + Sync {
    fn on_event(&self, event: &TaskEvent);
}

impl<F> TaskObserver for F
where
    F: Fn(&TaskEvent) + Send + Sync,
{
    fn on_event(&self, event: &TaskEvent) {
        self(event)
    }
}

/// The fixed progress sequence of a task run. Each event is paired with the
/// suspension that precedes it.
pub(crate) fn timeline(task: &str) -> Vec<(Duration, TaskEvent)> {
    vec![
        (
            Duration::ZERO,
            TaskEvent::Started {
                task: task.to_string(),
            },
        ),
        (Duration::ZERO, TaskEvent::Initializing),
        (Duration::from_millis(500), TaskEvent::LoadingDependencies),
        (Duration::from_millis(500), TaskEvent::Running),
        (
            Duration::from_millis(1000),
            TaskEvent::Completed {
                task: task.to_string(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_event_messages() {
        let messages: Vec<String> = timeline("build").iter().map(|(_, e)| e.to_string()).collect();

        assert_eq!(
            messages,
            vec![
                "Starting task: build",
                "Initializing environment...",
                "Loading dependencies...",
                "Running task...",
                "Task build completed successfully.",
            ]
        );
    }

    #[test]
    fn test_timeline_delays() {
        let total: Duration = timeline("x").iter().map(|(d, _)| *d).sum();
        assert_eq!(total, Duration::from_millis(2000));
    }

    #[test]
    fn test_closure_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |event: &TaskEvent| seen.lock().unwrap().push(event.clone());

        observer.on_event(&TaskEvent::Running);

        assert_eq!(*seen.lock().unwrap(), vec![TaskEvent::Running]);
    }
}
