//! Orchestration core for retag.
//!
//! Two phases, composed sequentially by [`run`]:
//!
//! 1. [`fetch_all_repos`] fans one search request per page across a bounded
//!    worker pool and merges the results in completion order.
//! 2. [`add_topic`] runs a read-modify-write topic update per repository,
//!    strictly sequentially.
//!
//! Every per-page and per-repository failure is absorbed into an outcome
//! value; nothing in this crate returns an error to the caller.

mod fetch;
mod run;
mod update;

pub use fetch::{fetch_all_repos, FetchOutcome};
pub use run::{run, RunSummary};
pub use update::{add_topic, TopicUpdate};

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory [`RepoTopicsApi`] for tests. No network.

    use async_trait::async_trait;
    use github::{Error, RepoTopicsApi, Repository, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted API double.
    ///
    /// Pages and per-repo topic lists are keyed up front; failures are
    /// scripted as HTTP status codes. Every PUT is recorded verbatim.
    #[derive(Default)]
    pub struct MockApi {
        pages: Mutex<HashMap<usize, std::result::Result<Vec<Repository>, u16>>>,
        topics: Mutex<HashMap<String, std::result::Result<Vec<String>, u16>>>,
        put_failures: Mutex<HashMap<String, u16>>,
        put_calls: Mutex<Vec<(String, Vec<String>)>>,
        get_calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_page(&self, page: usize, repos: Vec<Repository>) {
            self.pages.lock().unwrap().insert(page, Ok(repos));
        }

        /// Make `page` fail with the given status
        pub fn fail_page(&self, page: usize, status: u16) {
            self.pages.lock().unwrap().insert(page, Err(status));
        }

        pub fn set_topics(&self, full_name: &str, names: Vec<&str>) {
            self.topics.lock().unwrap().insert(
                full_name.to_string(),
                Ok(names.into_iter().map(String::from).collect()),
            );
        }

        pub fn fail_topics(&self, full_name: &str, status: u16) {
            self.topics
                .lock()
                .unwrap()
                .insert(full_name.to_string(), Err(status));
        }

        pub fn fail_put(&self, full_name: &str, status: u16) {
            self.put_failures
                .lock()
                .unwrap()
                .insert(full_name.to_string(), status);
        }

        pub fn put_calls(&self) -> Vec<(String, Vec<String>)> {
            self.put_calls.lock().unwrap().clone()
        }

        pub fn get_calls(&self) -> Vec<String> {
            self.get_calls.lock().unwrap().clone()
        }

        fn status_error(status: u16) -> Error {
            Error::Status {
                status,
                body: "scripted failure".to_string(),
            }
        }

        /// N placeholder repositories named `prefix-0..n`
        pub fn repos(prefix: &str, n: usize) -> Vec<Repository> {
            (0..n)
                .map(|i| Repository::from_full_name(format!("acme/{prefix}-{i}")))
                .collect()
        }
    }

    #[async_trait]
    impl RepoTopicsApi for MockApi {
        async fn search_repos_page(
            &self,
            _org: &str,
            _topic: &str,
            page: usize,
        ) -> Result<Vec<Repository>> {
            match self.pages.lock().unwrap().get(&page) {
                Some(Ok(repos)) => Ok(repos.clone()),
                Some(Err(status)) => Err(Self::status_error(*status)),
                // Past the scripted result set: empty page, like the real API
                None => Ok(Vec::new()),
            }
        }

        async fn get_topics(&self, full_name: &str) -> Result<Vec<String>> {
            self.get_calls.lock().unwrap().push(full_name.to_string());
            match self.topics.lock().unwrap().get(full_name) {
                Some(Ok(names)) => Ok(names.clone()),
                Some(Err(status)) => Err(Self::status_error(*status)),
                None => Ok(Vec::new()),
            }
        }

        async fn set_topics(&self, full_name: &str, names: &[String]) -> Result<()> {
            self.put_calls
                .lock()
                .unwrap()
                .push((full_name.to_string(), names.to_vec()));
            match self.put_failures.lock().unwrap().get(full_name) {
                Some(status) => Err(Self::status_error(*status)),
                None => Ok(()),
            }
        }
    }
}
