// src/exec/capture.rs

//! Output capture strategies for child processes.
//!
//! A [`super::CommandRunner`] owns exactly one strategy, chosen when the
//! runner is built. Both strategies drain the pipes to EOF so the child can
//! never block on a full pipe buffer; a read error ends draining but keeps
//! the text read so far.

use std::fmt::Debug;
use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout};
use tracing::debug;

use crate::types::CaptureMode;

/// Boxed future returned by [`OutputCapture::collect`].
pub type CaptureFuture<'a> = Pin<Box<dyn Future<Output = Captured> + Send + 'a>>;

/// Text drained from a child's pipes.
///
/// A read error stops draining but keeps everything read up to that point.
#[derive(Debug, Default)]
pub struct Captured {
    pub text: String,
    pub error: Option<io::Error>,
}

impl Captured {
    fn from_bytes(bytes: &[u8], error: Option<io::Error>) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
            error,
        }
    }

    /// Captured text with a diagnostic line appended if draining failed.
    pub fn into_output(self) -> String {
        let mut output = self.text;
        if let Some(err) = self.error {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&format!("atlas-ops: output capture failed: {err}\n"));
        }
        output
    }
}

/// Strategy for draining a child's stdout/stderr into a single string.
pub trait OutputCapture: Send + Sync + Debug {
    fn mode(&self) -> CaptureMode;

    /// Drain both pipes until EOF or a read error.
    fn collect<'a>(
        &'a self,
        stdout: Option<ChildStdout>,
        stderr: Option<ChildStderr>,
    ) -> CaptureFuture<'a>;
}

/// Build the strategy for a [`CaptureMode`].
pub fn capture_for(mode: CaptureMode) -> Box<dyn OutputCapture> {
    match mode {
        CaptureMode::Streaming => Box::new(StreamCapture),
        CaptureMode::Buffered => Box::new(BufferCapture),
    }
}

/// Echo stdout to the console line by line while accumulating it; send
/// stderr straight to the console's stderr without capturing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamCapture;

impl OutputCapture for StreamCapture {
    fn mode(&self) -> CaptureMode {
        CaptureMode::Streaming
    }

    fn collect<'a>(
        &'a self,
        stdout: Option<ChildStdout>,
        stderr: Option<ChildStderr>,
    ) -> CaptureFuture<'a> {
        Box::pin(async move {
            let (mut captured, forwarded) =
                tokio::join!(echo_captured(stdout), forward_stderr(stderr));
            if captured.error.is_none() {
                captured.error = forwarded.err();
            }
            captured
        })
    }
}

/// Capture stdout and stderr silently; output is stdout followed by stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferCapture;

impl OutputCapture for BufferCapture {
    fn mode(&self) -> CaptureMode {
        CaptureMode::Buffered
    }

    fn collect<'a>(
        &'a self,
        stdout: Option<ChildStdout>,
        stderr: Option<ChildStderr>,
    ) -> CaptureFuture<'a> {
        Box::pin(async move {
            let ((mut out, out_err), (err_bytes, err_err)) =
                tokio::join!(read_bytes(stdout), read_bytes(stderr));
            out.extend_from_slice(&err_bytes);
            Captured::from_bytes(&out, out_err.or(err_err))
        })
    }
}

/// Echo `reader` to stdout line by line and return what was read.
pub async fn echo_captured<R>(reader: Option<R>) -> Captured
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Captured::default();
    };

    let mut reader = BufReader::new(reader);
    let mut console = tokio::io::stdout();
    let mut console_open = true;
    let mut captured = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                captured.extend_from_slice(&line);
                return Captured::from_bytes(&captured, Some(err));
            }
        }

        // A closed console must not stop us draining the pipe.
        if console_open {
            if let Err(err) = echo_line(&mut console, &line).await {
                debug!(error = %err, "console stdout unavailable; capturing only");
                console_open = false;
            }
        }

        captured.extend_from_slice(&line);
    }

    Captured::from_bytes(&captured, None)
}

/// Read `reader` to EOF without echoing it.
pub async fn read_captured<R>(reader: Option<R>) -> Captured
where
    R: AsyncRead + Unpin,
{
    let (bytes, error) = read_bytes(reader).await;
    Captured::from_bytes(&bytes, error)
}

async fn echo_line(console: &mut tokio::io::Stdout, line: &[u8]) -> io::Result<()> {
    console.write_all(line).await?;
    console.flush().await
}

async fn forward_stderr<R>(reader: Option<R>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut console = tokio::io::stderr();
    if let Err(err) = tokio::io::copy(&mut reader, &mut console).await {
        debug!(error = %err, "console stderr unavailable; discarding remaining stderr");
        tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    }
    Ok(())
}

async fn read_bytes<R>(reader: Option<R>) -> (Vec<u8>, Option<io::Error>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let Some(mut reader) = reader else {
        return (buf, None);
    };

    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => return (buf, None),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return (buf, Some(err)),
        }
    }
}
