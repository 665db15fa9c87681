use chrono::{DateTime, Utc};
use dashboard_core::{AnnotatedArticle, CompanyProfile, DashboardError, RelatedCompany, Ticker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the presentation layer needs for one successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub ticker: Ticker,
    pub profile: CompanyProfile,
    pub news: Vec<AnnotatedArticle>,
    /// Index into `news`; `None` only when there is no news
    pub selected_index: Option<usize>,
    pub related: Vec<RelatedCompany>,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn selected(&self) -> Option<&AnnotatedArticle> {
        self.selected_index.and_then(|i| self.news.get(i))
    }
}

/// Outcome of one submission. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// Nothing submitted yet
    Empty,
    Ready(Dashboard),
    Failed {
        ticker: Option<Ticker>,
        error: DashboardError,
    },
}

impl SubmissionResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, SubmissionResult::Ready(_))
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            SubmissionResult::Ready(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match self {
            SubmissionResult::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Handed out by [`DashboardState::begin`]; identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Current view state shared by everyone looking at the dashboard.
///
/// Submissions may overlap; only the most recently started one is allowed
/// to publish. Results from superseded submissions are dropped.
pub struct DashboardState {
    latest: AtomicU64,
    current: RwLock<Arc<SubmissionResult>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            current: RwLock::new(Arc::new(SubmissionResult::Empty)),
        }
    }

    /// Start a submission, superseding any still in flight.
    pub fn begin(&self) -> SubmissionTicket {
        SubmissionTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `result` if `ticket` is still the latest submission.
    ///
    /// Returns whether the result was stored.
    pub async fn publish(&self, ticket: SubmissionTicket, result: SubmissionResult) -> bool {
        let mut current = self.current.write().await;
        // Checked under the write lock so a newer publish cannot be overwritten
        if self.latest.load(Ordering::SeqCst) != ticket.0 {
            tracing::debug!("Dropping result of superseded submission #{}", ticket.0);
            return false;
        }
        *current = Arc::new(result);
        true
    }

    pub async fn current(&self) -> Arc<SubmissionResult> {
        self.current.read().await.clone()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
