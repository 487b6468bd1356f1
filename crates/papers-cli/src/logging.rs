use std::io::IsTerminal;

use tracing::Subscriber;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Filter directives used when `RUST_LOG` is unset. HTTP internals stay at
/// info even in verbose mode.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "debug,hyper=info,hyper_util=info,reqwest=info"
    } else {
        "info"
    }
}

/// `RUST_LOG` when set, else [`default_directives`].
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// A fmt subscriber writing to `writer`. Nothing is installed.
pub fn subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish()
}

/// Log to stderr for the lifetime of the returned guard. Scoped to the
/// calling thread, so the run must stay on it (current-thread runtime).
pub fn init(verbose: bool) -> DefaultGuard {
    let ansi = std::io::stderr().is_terminal();
    tracing::subscriber::set_default(subscriber(env_filter(verbose), std::io::stderr, ansi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use papers_core::{PaperRecord, export_papers};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(verbose: bool, f: impl FnOnce()) -> String {
        let out = Capture::default();
        let writer = out.clone();
        let sub = subscriber(
            EnvFilter::new(default_directives(verbose)),
            move || writer.clone(),
            false,
        );
        tracing::subscriber::with_default(sub, f);
        out.contents()
    }

    #[test]
    fn skipped_paper_is_warned_about() {
        let papers = vec![
            PaperRecord {
                title: "Paper A".into(),
                fulltext: Some("Body A".into()),
                ..Default::default()
            },
            PaperRecord {
                title: "Paper B".into(),
                fulltext: Some(String::new()),
                ..Default::default()
            },
        ];
        let logs = capture(false, || {
            export_papers(&papers, None);
        });
        assert!(logs.contains("WARN"));
        assert!(logs.contains("No fulltext found for paper 'Paper B'"));
        assert_eq!(logs.matches("No fulltext found").count(), 1);
        assert!(logs.contains("Would process paper 'Paper A'"));
        assert!(logs.contains("Successfully processed 1 papers"));
    }

    #[test]
    fn empty_library_is_warned_about() {
        let logs = capture(false, || {
            export_papers(&[], None);
        });
        assert!(logs.contains("No papers found in the library."));
        assert!(!logs.contains("Successfully processed"));
    }

    #[test]
    fn debug_only_when_verbose() {
        let quiet = capture(false, || tracing::debug!("detail"));
        assert!(!quiet.contains("detail"));
        let loud = capture(true, || tracing::debug!("detail"));
        assert!(loud.contains("detail"));
    }

    #[test]
    fn guard_scopes_the_subscriber() {
        let out = Capture::default();
        let writer = out.clone();
        {
            let _guard = tracing::subscriber::set_default(subscriber(
                EnvFilter::new("info"),
                move || writer.clone(),
                false,
            ));
            tracing::info!("inside");
        }
        tracing::info!("outside");
        let logs = out.contents();
        assert!(logs.contains("inside"));
        assert!(!logs.contains("outside"));
    }
}
