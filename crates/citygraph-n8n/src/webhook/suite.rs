//! Canned webhook scenarios and their tally.

use super::{WebhookClient, WebhookPayload, WebhookResponse};
use crate::error::Result;

/// What a test case needs from the webhook to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The webhook must answer with a 2xx status.
    Success,
    /// Any HTTP response passes; only transport failures count.
    AnyResponse,
}

/// A titled payload sent to the webhook.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Short title shown before the case runs.
    pub title: String,
    /// Payload to post.
    pub payload: WebhookPayload,
    /// Pass criterion.
    pub expectation: Expectation,
}

impl TestCase {
    /// Creates a case whose expectation follows from the payload: the
    /// `invalid_action` probe accepts any answer, everything else needs a 2xx.
    pub fn new(title: impl Into<String>, payload: WebhookPayload) -> Self {
        let expectation = match payload {
            WebhookPayload::InvalidAction { .. } => Expectation::AnyResponse,
            _ => Expectation::Success,
        };

        Self {
            title: title.into(),
            payload,
            expectation,
        }
    }

    /// Sends the payload and applies the expectation.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, or on a non-2xx status when the
    /// case expects success. The error keeps the status and body.
    pub async fn run(&self, client: &WebhookClient) -> Result<WebhookResponse> {
        let response = client.send(&self.payload).await?;

        match self.expectation {
            Expectation::Success => response.error_for_status(),
            Expectation::AnyResponse => Ok(response),
        }
    }
}

/// The five scenarios run by the full suite, in order.
///
/// Each case is built when the iterator reaches it, so every chat case gets a
/// session id stamped with the time it actually runs.
pub fn default_suite() -> impl Iterator<Item = TestCase> {
    let cases: [(&'static str, fn() -> WebhookPayload); 5] = [
        ("Chat - Greeting", || {
            WebhookPayload::chat("Hello, how are you?", None, None)
        }),
        ("Chat - Help Request", || {
            WebhookPayload::chat("I need help with this system", None, None)
        }),
        ("Chat - Address Query", || {
            WebhookPayload::chat("Can you help me extract addresses?", None, None)
        }),
        ("Address Extraction", || {
            WebhookPayload::extract_address("README.md")
        }),
        ("Invalid Action Handling", WebhookPayload::invalid_action),
    ];

    cases
        .into_iter()
        .map(|(title, payload)| TestCase::new(title, payload()))
}

/// Pass/fail counters for a suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSummary {
    /// Cases that met their expectation.
    pub passed: usize,
    /// Cases that did not.
    pub failed: usize,
}

impl TestSummary {
    /// Records one outcome.
    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Total number of recorded cases.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of passing cases, 0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.passed as f64 / total as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_default_suite_order() {
        let suite: Vec<_> = default_suite().collect();
        let actions: Vec<_> = suite.iter().map(|case| case.payload.action()).collect();

        assert_eq!(
            actions,
            ["chat", "chat", "chat", "extract_address", "invalid_action"]
        );
        assert_eq!(suite[3].payload, WebhookPayload::extract_address("README.md"));
    }

    #[test]
    fn test_expectations() {
        let suite: Vec<_> = default_suite().collect();
        assert!(
            suite[..4]
                .iter()
                .all(|case| case.expectation == Expectation::Success)
        );
        assert_eq!(suite[4].expectation, Expectation::AnyResponse);
    }

    #[test]
    fn test_chat_session_is_stamped_when_case_is_reached() {
        fn session_id(case: TestCase) -> String {
            match case.payload {
                WebhookPayload::Chat { session_id, .. } => session_id,
                other => panic!("expected a chat payload, got {other:?}"),
            }
        }

        let mut suite = default_suite();
        let first = session_id(suite.next().unwrap());
        thread::sleep(Duration::from_millis(1100));
        let second = session_id(suite.next().unwrap());

        assert_ne!(first, second);
        assert!(second.starts_with("session_"));
    }

    #[test]
    fn test_summary() {
        let mut summary = TestSummary::default();
        assert_eq!(summary.success_rate(), 0.0);

        summary.record(true);
        summary.record(true);
        summary.record(false);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(format!("{:.1}", summary.success_rate()), "66.7");
    }
}
