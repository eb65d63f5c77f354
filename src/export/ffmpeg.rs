use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::Context;

use crate::export::raster::FrameRGBA;
use crate::export::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Options for [`MovSink`].
#[derive(Clone, Debug)]
pub struct MovSinkOpts {
    /// Output `.mov` path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl MovSinkOpts {
    /// Options writing to `out_path`, overwriting.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that streams frames into the system `ffmpeg` and writes a QuickTime file with PNG
/// frames, so transparency survives.
pub struct MovSink {
    opts: MovSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    next_idx: usize,
}

impl MovSink {
    /// Create a sink; `ffmpeg` is started in `begin`.
    pub fn new(opts: MovSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            next_idx: 0,
        }
    }
}

impl FrameSink for MovSink {
    fn begin(&mut self, cfg: SinkConfig) -> SvgBurstResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(SvgBurstError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SvgBurstError::validation(
                "mov sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SvgBurstError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SvgBurstError::export(
                "ffmpeg is required for MOV encoding, but was not found on PATH",
            ));
        }

        let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-framerate",
            &rate,
            "-i",
            "pipe:0",
            "-an",
            "-r",
            &rate,
            "-c:v",
            "png",
            "-pix_fmt",
            "rgba",
            "-f",
            "mov",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SvgBurstError::export(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SvgBurstError::export("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SvgBurstError::export("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(out = %self.opts.out_path.display(), %rate, "ffmpeg started");
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> SvgBurstResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SvgBurstError::export("mov sink not started"))?;
        if idx != self.next_idx {
            return Err(SvgBurstError::export(format!(
                "mov sink expected frame {}, got {idx}",
                self.next_idx
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SvgBurstError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SvgBurstError::export("mov sink is already finalized"));
        };
        stdin
            .write_all(&frame.data)
            .map_err(|e| SvgBurstError::export(format!("failed to write frame to ffmpeg: {e}")))?;
        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> SvgBurstResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SvgBurstError::export("mov sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| SvgBurstError::export(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SvgBurstError::export("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| SvgBurstError::export(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        tracing::debug!(%status, frames = self.next_idx, "ffmpeg finished");
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(SvgBurstError::export(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(mut child) = self.child.take() {
            // Kill before closing stdin so ffmpeg never sees EOF and finalizes the container.
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "ffmpeg already exited");
            }
            drop(self.stdin.take());
            let _ = child.wait();
        }
        drop(self.stdin.take());
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }

        if self.cfg.take().is_some() {
            match std::fs::remove_file(&self.opts.out_path) {
                Ok(()) => {
                    tracing::debug!(out = %self.opts.out_path.display(), "removed partial output");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        out = %self.opts.out_path.display(),
                        error = %e,
                        "failed to remove partial output"
                    );
                }
            }
        }
        self.next_idx = 0;
    }
}

impl Drop for MovSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> SvgBurstResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/export/ffmpeg.rs"]
mod tests;
