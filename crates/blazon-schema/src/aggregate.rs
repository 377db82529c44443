//! # Aggregation Protocol
//!
//! Runs a set of independent validation tasks and reconciles their outcomes.
//!
//! All tasks are polled together by one `join_all` on the caller's task, so
//! there is no thread hand-off and no shared state between them. Every task
//! runs to completion even after a sibling fails; nothing is cancelled.
//! Results come back in declaration order whatever order the tasks finished
//! in.
//!
//! The decision rule:
//!
//! - any task failed → the failures of every failed task, concatenated in
//!   declaration order; successes are dropped.
//! - no task failed → every result in declaration order.

use std::future::Future;

use futures::future::join_all;

use blazon_core::{ErrorEntry, Outcome, Resolved};

/// Run every task to completion and apply the decision rule.
pub(crate) async fn settle_all<F>(tasks: Vec<F>) -> Result<Vec<Resolved>, Vec<ErrorEntry>>
where
    F: Future<Output = Outcome>,
{
    settle(join_all(tasks).await)
}

/// Run every task to completion and return the first success in declaration
/// order, or `None` when every task failed.
pub(crate) async fn first_success<F>(tasks: Vec<F>) -> Option<Resolved>
where
    F: Future<Output = Outcome>,
{
    join_all(tasks).await.into_iter().find_map(Result::ok)
}

/// Decision rule over already-settled outcomes.
pub(crate) fn settle(outcomes: Vec<Outcome>) -> Result<Vec<Resolved>, Vec<ErrorEntry>> {
    if outcomes.iter().any(Result::is_err) {
        return Err(outcomes
            .into_iter()
            .filter_map(Result::err)
            .flatten()
            .collect());
    }
    Ok(outcomes.into_iter().filter_map(Result::ok).collect())
}
