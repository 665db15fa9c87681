//! The two join disciplines used by a submission.
//!
//! Both await their members concurrently on the calling task; neither spawns.

use dashboard_core::DashboardError;
use std::future::Future;

/// Await three fallible futures; succeed only if all three do.
///
/// On failure the reported error is chosen in argument order, preferring the
/// first one whose message is non-empty.
pub async fn join_all_or_nothing<A, B, C, FA, FB, FC>(
    a: FA,
    b: FB,
    c: FC,
) -> Result<(A, B, C), DashboardError>
where
    FA: Future<Output = Result<A, DashboardError>>,
    FB: Future<Output = Result<B, DashboardError>>,
    FC: Future<Output = Result<C, DashboardError>>,
{
    let (a, b, c) = tokio::join!(a, b, c);

    match (a, b, c) {
        (Ok(a), Ok(b), Ok(c)) => Ok((a, b, c)),
        (a, b, c) => {
            let errors: Vec<DashboardError> = [a.err(), b.err(), c.err()].into_iter().flatten().collect();
            let chosen = errors
                .iter()
                .position(|e| !e.message().is_empty())
                .unwrap_or(0);
            Err(errors.into_iter().nth(chosen).unwrap_or_else(|| {
                DashboardError::ApiError("request failed".to_string())
            }))
        }
    }
}

/// Await every future to completion and collect the outputs in input order.
///
/// Members have already mapped their own failures to `None`, so the group
/// never finishes early.
pub async fn join_all_settled<I, F, T>(futures: I) -> Vec<Option<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Option<T>>,
{
    futures::future::join_all(futures).await
}
