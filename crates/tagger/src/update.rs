//! Per-repository topic update

use github::RepoTopicsApi;

/// Outcome of one read-modify-write topic update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicUpdate {
    /// Topic appended and written back successfully
    Added,
    /// Topic was already on the repository; no write issued
    AlreadyPresent,
    /// Current topics could not be read; no write issued
    FetchFailed,
    /// The replacement write was rejected or lost
    PutFailed { status: Option<u16> },
}

impl TopicUpdate {
    pub fn is_added(&self) -> bool {
        matches!(self, TopicUpdate::Added)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TopicUpdate::FetchFailed | TopicUpdate::PutFailed { .. })
    }
}

/// Add `new_topic` to a repository unless it already carries it.
///
/// Reads the topic set fresh, appends on a case-sensitive miss, and writes
/// the full replacement list back. Last-write-wins against concurrent
/// external mutators; there is no versioning. Every failure is logged and
/// absorbed into the returned outcome.
pub async fn add_topic(
    api: &dyn RepoTopicsApi,
    full_name: &str,
    new_topic: &str,
) -> TopicUpdate {
    let mut topics = match api.get_topics(full_name).await {
        Ok(topics) => topics,
        Err(error) => {
            tracing::error!(repo = full_name, %error, "failed to read topics, skipping");
            return TopicUpdate::FetchFailed;
        }
    };

    if topics.iter().any(|t| t == new_topic) {
        tracing::info!(repo = full_name, topic = new_topic, "topic already exists");
        return TopicUpdate::AlreadyPresent;
    }

    topics.push(new_topic.to_string());
    match api.set_topics(full_name, &topics).await {
        Ok(()) => {
            tracing::info!(repo = full_name, topic = new_topic, "topic added");
            TopicUpdate::Added
        }
        Err(error) => {
            tracing::error!(repo = full_name, %error, "failed to write topics");
            TopicUpdate::PutFailed {
                status: error.status(),
            }
        }
    }
}
