//! Concurrent page aggregation

use github::{RepoTopicsApi, Repository};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Combined result of the page-fetch phase.
///
/// A failed page contributes zero records; the count is the only way to tell
/// it apart from a legitimately empty page.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// All records, concatenated in completion order
    pub repos: Vec<Repository>,
    /// Pages that answered, including empty ones
    pub pages_fetched: usize,
    /// Pages lost to transport errors or non-success statuses
    pub pages_failed: usize,
}

/// Fetch pages `1..=total_pages` through a pool of at most `concurrency`
/// simultaneous requests and merge the results.
///
/// Page count comes from the caller's estimate, never from search metadata:
/// an undershoot silently truncates the result set, an overshoot just
/// produces empty trailing pages. Collection is completion-ordered, so the
/// output order is a function of network timing.
pub async fn fetch_all_repos(
    api: Arc<dyn RepoTopicsApi>,
    org: &str,
    topic: &str,
    total_pages: usize,
    concurrency: usize,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    if total_pages == 0 {
        return outcome;
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set: JoinSet<(usize, github::Result<Vec<Repository>>)> = JoinSet::new();

    for page in 1..=total_pages {
        let api = Arc::clone(&api);
        let semaphore = Arc::clone(&semaphore);
        let org = org.to_string();
        let topic = topic.to_string();

        join_set.spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        page,
                        Err(github::Error::Internal(
                            "worker pool closed unexpectedly".to_string(),
                        )),
                    );
                }
            };
            let result = api.search_repos_page(&org, &topic, page).await;
            (page, result)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((page, Ok(mut repos))) => {
                tracing::info!(page, count = repos.len(), "fetched page");
                outcome.pages_fetched += 1;
                outcome.repos.append(&mut repos);
            }
            Ok((page, Err(error))) => {
                tracing::warn!(page, %error, "page fetch failed");
                outcome.pages_failed += 1;
            }
            Err(join_error) => {
                tracing::warn!(%join_error, "page fetch task panicked");
                outcome.pages_failed += 1;
            }
        }
    }

    tracing::info!(
        pages_fetched = outcome.pages_fetched,
        pages_failed = outcome.pages_failed,
        repos = outcome.repos.len(),
        "page fetch phase complete"
    );
    outcome
}
