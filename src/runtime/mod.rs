//! Task execution seam for fire-and-forget background work.
//!
//! The core never blocks on a submitted task and never observes its result;
//! failure handling belongs inside the task itself.

use futures::future::BoxFuture;

/// Submits background jobs.
pub trait TaskExecutor: Send + Sync + 'static {
    fn submit(&self, task: BoxFuture<'static, ()>);
}

/// Executor backed by the ambient tokio runtime.
#[derive(Debug, Default, Clone)]
pub struct TokioExecutor;

impl TaskExecutor for TokioExecutor {
    fn submit(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}
