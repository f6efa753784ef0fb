//! Scoped CPU profiling of a whole run.
//!
//! Sampling starts in [`CpuProfile::start`]. [`CpuProfile::finish`] writes a
//! flamegraph SVG; dropping the profile without finishing stops sampling and
//! writes nothing.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::{Error, Result};

/// Sampling frequency in Hz.
const FREQUENCY: i32 = 1000;

/// A running CPU profiler and the path its report goes to.
#[cfg(unix)]
pub struct CpuProfile {
    guard: pprof::ProfilerGuard<'static>,
    path: PathBuf,
}

#[cfg(unix)]
impl CpuProfile {
    /// Start sampling.
    ///
    /// # Errors
    ///
    /// [`Error::Profiler`] if the profiler cannot be started.
    pub fn start(path: &Path) -> Result<Self> {
        let guard = pprof::ProfilerGuardBuilder::default()
            .frequency(FREQUENCY)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()
            .map_err(|e| Error::Profiler(e.to_string()))?;
        info!(path = %path.display(), "cpu profile started");
        Ok(Self {
            guard,
            path: path.to_path_buf(),
        })
    }

    /// Stop sampling and write the flamegraph.
    ///
    /// A run too short to collect a single sample writes no file.
    ///
    /// # Errors
    ///
    /// [`Error::Profiler`] if the report cannot be built or rendered,
    /// [`Error::Io`] if the file cannot be created.
    pub fn finish(self) -> Result<()> {
        let report = self
            .guard
            .report()
            .build()
            .map_err(|e| Error::Profiler(e.to_string()))?;
        if report.data.is_empty() {
            warn!(path = %self.path.display(), "no cpu samples collected, profile not written");
            return Ok(());
        }
        let file = std::fs::File::create(&self.path)?;
        report
            .flamegraph(file)
            .map_err(|e| Error::Profiler(e.to_string()))?;
        info!(path = %self.path.display(), "cpu profile written");
        Ok(())
    }
}

/// CPU profiling is unavailable on this platform.
#[cfg(not(unix))]
pub struct CpuProfile {
    path: PathBuf,
}

#[cfg(not(unix))]
impl CpuProfile {
    /// Always fails: profiling needs a unix target.
    ///
    /// # Errors
    ///
    /// Always [`Error::Profiler`].
    pub fn start(path: &Path) -> Result<Self> {
        Err(Error::Profiler(format!(
            "cannot profile to {}: unsupported platform",
            path.display()
        )))
    }

    /// Never reached, since [`CpuProfile::start`] always fails.
    ///
    /// # Errors
    ///
    /// Always [`Error::Profiler`].
    pub fn finish(self) -> Result<()> {
        Err(Error::Profiler(format!(
            "cannot profile to {}: unsupported platform",
            self.path.display()
        )))
    }
}

impl core::fmt::Debug for CpuProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CpuProfile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
