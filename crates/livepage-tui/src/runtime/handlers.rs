//! Effect handlers that touch the isolated surface.
//!
//! Both run on the blocking pool: writing the host page and launching the
//! browser are synchronous I/O.

use livepage_core::preview::{IsolatedSurface, PreviewHandle};

use crate::events::UiEvent;

/// Loads `html` into a fresh isolated surface.
pub fn render_preview(surface: &dyn IsolatedSurface, seq: u64, html: &str) -> UiEvent {
    let result = surface.render_isolated(html).map_err(|err| {
        tracing::warn!(error = %format!("{err:#}"), "preview render failed");
        format!("{err:#}")
    });
    UiEvent::PreviewRendered { seq, result }
}

/// Shows an existing preview again. Only failures produce an event.
pub fn reopen_preview(surface: &dyn IsolatedSurface, handle: &PreviewHandle) -> Option<UiEvent> {
    match surface.reopen(handle) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "preview reopen failed");
            Some(UiEvent::PreviewReopenFailed(format!("{err:#}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::{Result, bail};

    use super::*;

    struct FailingSurface;

    impl IsolatedSurface for FailingSurface {
        fn render_isolated(&self, _html: &str) -> Result<PreviewHandle> {
            bail!("read-only file system")
        }

        fn reopen(&self, _handle: &PreviewHandle) -> Result<()> {
            bail!("no browser")
        }
    }

    struct MemorySurface;

    impl IsolatedSurface for MemorySurface {
        fn render_isolated(&self, html: &str) -> Result<PreviewHandle> {
            Ok(PreviewHandle {
                path: PathBuf::from("mem.html"),
                document_len: html.len(),
            })
        }

        fn reopen(&self, _handle: &PreviewHandle) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_preview_reports_handle() {
        let event = render_preview(&MemorySurface, 4, "<p></p>");
        match event {
            UiEvent::PreviewRendered {
                seq: 4,
                result: Ok(handle),
            } => assert_eq!(handle.document_len, 7),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_render_preview_reports_error() {
        let event = render_preview(&FailingSurface, 1, "");
        assert!(matches!(
            event,
            UiEvent::PreviewRendered { seq: 1, result: Err(ref err) } if err.contains("read-only")
        ));
    }

    #[test]
    fn test_reopen_preview_only_reports_failures() {
        let handle = PreviewHandle {
            path: PathBuf::from("x.html"),
            document_len: 0,
        };
        assert!(reopen_preview(&MemorySurface, &handle).is_none());
        assert!(matches!(
            reopen_preview(&FailingSurface, &handle),
            Some(UiEvent::PreviewReopenFailed(_))
        ));
    }
}
