// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How a [`crate::exec::CommandRunner`] treats child process output.
///
/// - `Streaming`: stdout is echoed to the console line by line while it is
///   also accumulated into the step output; stderr goes straight to the
///   console and is not captured (default, interactive use).
/// - `Buffered`: nothing is echoed; stdout and stderr are both captured and
///   concatenated (stdout first) once the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    #[default]
    Streaming,
    Buffered,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Streaming => "streaming",
            CaptureMode::Buffered => "buffered",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streaming" | "stream" => Ok(CaptureMode::Streaming),
            "buffered" | "buffer" => Ok(CaptureMode::Buffered),
            other => Err(format!(
                "invalid capture mode: {other} (expected \"streaming\" or \"buffered\")"
            )),
        }
    }
}
