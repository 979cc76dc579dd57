// tests/output_capture.rs

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use atlas_ops::exec::{echo_captured, read_captured, Captured};
use tokio::io::{AsyncRead, ReadBuf};

/// Yields one chunk of text, then fails every read.
struct FailingPipe {
    chunk: Option<&'static [u8]>,
}

impl FailingPipe {
    fn after(chunk: &'static [u8]) -> Self {
        Self { chunk: Some(chunk) }
    }
}

impl AsyncRead for FailingPipe {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.chunk.take() {
            Some(chunk) => {
                buf.put_slice(chunk);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "pipe went away",
            ))),
        }
    }
}

#[tokio::test]
async fn buffered_read_error_keeps_partial_output() {
    let captured = read_captured(Some(FailingPipe::after(b"first line\nsecond"))).await;

    assert_eq!(captured.text, "first line\nsecond");
    assert!(captured.error.is_some());

    let output = captured.into_output();
    assert!(output.starts_with("first line\nsecond\n"));
    assert!(output.ends_with("atlas-ops: output capture failed: pipe went away\n"));
}

#[tokio::test]
async fn streaming_read_error_keeps_lines_already_echoed() {
    let captured = echo_captured(Some(FailingPipe::after(b"echoed\n"))).await;

    assert_eq!(captured.text, "echoed\n");
    assert_eq!(
        captured.into_output(),
        "echoed\natlas-ops: output capture failed: pipe went away\n"
    );
}

#[tokio::test]
async fn clean_capture_has_no_diagnostic() {
    let captured = read_captured(Some(&b"all good\n"[..])).await;

    assert!(captured.error.is_none());
    assert_eq!(captured.into_output(), "all good\n");
}

#[tokio::test]
async fn missing_pipe_captures_nothing() {
    let captured = echo_captured(None::<&[u8]>).await;

    assert!(captured.error.is_none());
    assert_eq!(Captured::default().into_output(), captured.into_output());
}
