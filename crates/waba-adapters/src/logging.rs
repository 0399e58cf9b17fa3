//! `Logger` port backed by `tracing`.

use std::error::Error as StdError;

use waba_core::application::ports::Logger;

/// Emits service log lines as `tracing` events under the `waba` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "waba", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "waba", "{message}");
    }

    fn error(&self, message: &str, cause: &(dyn StdError + 'static)) {
        tracing::error!(target: "waba", error = %cause, chain = %chain(cause), "{message}");
    }
}

/// `outer: inner: root` rendering of an error's source chain.
fn chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use waba_core::error::MessageError;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn events_use_waba_target() {
        let out = capture(|| {
            TracingLogger.info("Fetching up to 20 templates");
            TracingLogger.debug("GET /1/message_templates");
        });
        assert!(out.contains("INFO waba: Fetching up to 20 templates"));
        assert!(out.contains("DEBUG waba: GET /1/message_templates"));
    }

    #[test]
    fn error_records_cause_chain() {
        let cause = MessageError::wrap("send_template_error", io::Error::other("socket closed"));
        let out = capture(|| TracingLogger.error("send_template failed", &cause));
        assert!(out.contains("ERROR waba: send_template failed"));
        assert!(out.contains("socket closed"));
    }

    #[test]
    fn chain_walks_sources() {
        let cause = MessageError::wrap("x", io::Error::other("root"));
        assert_eq!(chain(&cause), "root: root");
    }
}
