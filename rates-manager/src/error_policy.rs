//! What happens when a fetch fails: log it and carry on.

use rates_types::FetchError;

/// Logs a failed fetch at `warn` with enough detail to diagnose it.
///
/// The error ends here; the schedule keeps running.
pub(crate) fn report_fetch_failure(err: &FetchError) {
    match err {
        FetchError::Transport { message } => {
            tracing::warn!(
                kind = err.kind(),
                %message,
                "Updating rates failed: source unreachable"
            );
        }
        FetchError::Rejected {
            status,
            status_text,
            body,
        } => {
            tracing::warn!(
                kind = err.kind(),
                status = *status,
                %status_text,
                %body,
                "A request for updating rates failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logged(err: &FetchError) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, || report_fetch_failure(err));
        logs.contents()
    }

    #[test]
    fn test_rejection_logged_with_status_and_body() {
        let output = logged(&FetchError::Rejected {
            status: 429,
            status_text: "Too Many Requests".into(),
            body: r#"{"message":"API rate limit exceeded"}"#.into(),
        });

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("rejected"));
        assert!(output.contains("429"));
        assert!(output.contains("Too Many Requests"));
        assert!(output.contains("API rate limit exceeded"));
    }

    #[test]
    fn test_transport_failure_logged_with_message() {
        let output = logged(&FetchError::transport("connection refused"));

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("transport"));
        assert!(output.contains("connection refused"));
    }
}
