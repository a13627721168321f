//! Full-run driver: fetch phase, then the sequential update loop

use crate::fetch::fetch_all_repos;
use crate::update::{add_topic, TopicUpdate};
use github::{RepoTopicsApi, Repository};
use shared::RetagConfig;
use std::sync::Arc;

/// Aggregated counts for one retag run.
///
/// This is the caller-facing error surface: individual failures never
/// propagate, they only show up here and in the logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Search pages that answered
    pub pages_fetched: usize,
    /// Search pages lost to errors
    pub pages_failed: usize,
    /// Repositories aggregated from all pages
    pub repos_found: usize,
    /// Topic written successfully
    pub added: usize,
    /// Topic was already present
    pub already_present: usize,
    /// Topic read failed; repository skipped
    pub fetch_failed: usize,
    /// Replacement write rejected
    pub put_failed: usize,
}

impl RunSummary {
    fn record(&mut self, update: &TopicUpdate) {
        match update {
            TopicUpdate::Added => self.added += 1,
            TopicUpdate::AlreadyPresent => self.already_present += 1,
            TopicUpdate::FetchFailed => self.fetch_failed += 1,
            TopicUpdate::PutFailed { .. } => self.put_failed += 1,
        }
    }

    /// Update attempts that finished without an error
    pub fn succeeded(&self) -> usize {
        self.added + self.already_present
    }

    /// Update attempts that hit an error
    pub fn failed(&self) -> usize {
        self.fetch_failed + self.put_failed
    }
}

/// Search `config.org_name` for repositories with `search_topic`, then apply
/// `config.legacy_topic` to each match.
///
/// Page fetches run through the bounded pool; updates run one at a time in
/// aggregation order. `on_update` fires after each update with the
/// zero-based index, the total repository count, the repository, and its
/// outcome (progress reporting hook for the CLI).
pub async fn run(
    api: Arc<dyn RepoTopicsApi>,
    config: &RetagConfig,
    search_topic: &str,
    mut on_update: impl FnMut(usize, usize, &Repository, &TopicUpdate),
) -> RunSummary {
    let fetch = fetch_all_repos(
        Arc::clone(&api),
        &config.org_name,
        search_topic,
        config.total_pages(),
        config.concurrency,
    )
    .await;

    let mut summary = RunSummary {
        pages_fetched: fetch.pages_fetched,
        pages_failed: fetch.pages_failed,
        repos_found: fetch.repos.len(),
        ..RunSummary::default()
    };

    let total = fetch.repos.len();
    for (index, repo) in fetch.repos.iter().enumerate() {
        let update = add_topic(api.as_ref(), &repo.full_name, &config.legacy_topic).await;
        summary.record(&update);
        on_update(index, total, repo, &update);
    }

    tracing::info!(
        repos = summary.repos_found,
        added = summary.added,
        already_present = summary.already_present,
        failed = summary.failed(),
        "run complete"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockApi;

    fn config() -> RetagConfig {
        let mut config = RetagConfig::new("ghp_test", "acme");
        config.estimated_total = 150;
        config
    }

    // ============== End-to-End Tests ==============

    #[tokio::test]
    async fn test_150_repos_over_two_pages() {
        let api = Arc::new(MockApi::new());
        api.set_page(1, MockApi::repos("p1", 100));
        api.set_page(2, MockApi::repos("p2", 50));

        let summary = run(api.clone(), &config(), "foo", |_, _, _, _| {}).await;

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.repos_found, 150);
        assert_eq!(summary.added, 150);
        assert_eq!(summary.failed(), 0);
        // One sequential update cycle per repository
        assert_eq!(api.get_calls().len(), 150);
        assert_eq!(api.put_calls().len(), 150);
    }

    #[tokio::test]
    async fn test_callback_sees_every_repo_in_order() {
        let api = Arc::new(MockApi::new());
        api.set_page(1, MockApi::repos("p1", 5));

        let mut config = config();
        config.estimated_total = 5;

        let mut seen = Vec::new();
        let summary = run(api, &config, "foo", |index, total, repo, update| {
            seen.push((index, total, repo.full_name.clone(), update.clone()));
        })
        .await;

        assert_eq!(summary.repos_found, 5);
        assert_eq!(seen.len(), 5);
        let indices: Vec<usize> = seen.iter().map(|(i, _, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(seen.iter().all(|(_, total, _, _)| *total == 5));
        assert!(seen.iter().all(|(_, _, _, u)| u.is_added()));
    }

    #[tokio::test]
    async fn test_mixed_outcomes_counted() {
        let api = Arc::new(MockApi::new());
        api.set_page(
            1,
            vec![
                github::Repository::from_full_name("acme/add-me"),
                github::Repository::from_full_name("acme/has-it"),
                github::Repository::from_full_name("acme/bad-get"),
                github::Repository::from_full_name("acme/bad-put"),
            ],
        );
        api.set_topics("acme/has-it", vec!["legacy"]);
        api.fail_topics("acme/bad-get", 500);
        api.fail_put("acme/bad-put", 403);

        let mut config = config();
        config.estimated_total = 4;

        let summary = run(api, &config, "foo", |_, _, _, _| {}).await;

        assert_eq!(summary.repos_found, 4);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.already_present, 1);
        assert_eq!(summary.fetch_failed, 1);
        assert_eq!(summary.put_failed, 1);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 2);
    }

    #[tokio::test]
    async fn test_failed_pages_reported_in_summary() {
        let api = Arc::new(MockApi::new());
        api.set_page(1, MockApi::repos("p1", 100));
        api.fail_page(2, 503);

        let summary = run(api, &config(), "foo", |_, _, _, _| {}).await;

        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.repos_found, 100);
        assert_eq!(summary.added, 100);
    }

    #[tokio::test]
    async fn test_empty_org_runs_to_completion() {
        let api = Arc::new(MockApi::new());

        let summary = run(api.clone(), &config(), "foo", |_, _, _, _| {}).await;

        assert_eq!(summary.repos_found, 0);
        assert_eq!(summary.pages_fetched, 2);
        assert!(api.put_calls().is_empty());
    }

    // ============== Summary Tests ==============

    #[test]
    fn test_summary_default_is_zero() {
        let summary = RunSummary::default();
        assert_eq!(summary.succeeded(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
