//! Per-request correlation identifier.
//!
//! The HTTP middleware opens a scope for every request; anything running
//! inside that future (handlers, the feature service, error constructors) can
//! read the identifier through [`TraceId::current`]. Task locals do not follow
//! `tokio::spawn` or `spawn_blocking`, so re-enter the scope there if the
//! identifier is needed.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID v4 attached to a single request.
///
/// # Examples
/// ```
/// use geo_ingest::domain::TraceId;
///
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the enclosing scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use geo_ingest::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id: TraceId = "4f8c2a9e-1b7d-4c3e-9a6f-0d2b5e8c1a73".parse().expect("uuid");
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn scope_exposes_identifier_to_nested_calls() {
        async fn nested() -> Option<TraceId> {
            TraceId::current()
        }

        let trace_id = TraceId::generate();
        let seen = TraceId::scope(trace_id, async { nested().await }).await;
        assert_eq!(seen, Some(trace_id));
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_scope() {
        let seen = TraceId::scope(TraceId::generate(), async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("task joins")
        })
        .await;
        assert!(seen.is_none());
    }

    #[rstest]
    fn display_is_hyphenated_uuid() {
        let trace_id = TraceId::generate();
        let rendered = trace_id.to_string();
        assert_eq!(rendered.len(), 36);
        assert_eq!(rendered.parse::<TraceId>().expect("parses back"), trace_id);
    }

    #[rstest]
    #[case("")]
    #[case("trace-1")]
    fn rejects_non_uuid_text(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }
}
