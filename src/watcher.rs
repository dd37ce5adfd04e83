use crate::driver::{BuildReport, ShaderBuildDriver};
use crate::stage::ShaderSource;
use crate::{Result, ShaderBuildDriverBuilder};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// Rebuilds the shader tree whenever a shader source is created or modified.
///
/// Every rebuild is a full run of the driver; nothing is tracked between runs.
pub struct ShaderWatcher {
    _watcher: RecommendedWatcher,
    rebuild_receiver: Mutex<Receiver<()>>,
    last_report: Arc<Mutex<BuildReport>>,
}

impl ShaderWatcher {
    /// Creates a builder for customizing the watched driver.
    pub fn builder(root: impl AsRef<Path>) -> ShaderBuildDriverBuilder {
        ShaderBuildDriverBuilder::new(root)
    }

    pub(crate) fn new(driver: ShaderBuildDriver, debounce_ms: u64) -> Result<Self> {
        let (rebuild_tx, rebuild_rx): (Sender<()>, Receiver<()>) = channel();
        let driver = Arc::new(driver);
        let root = driver.root().to_path_buf();

        log::info!("Performing initial shader build...");
        let report = driver.run();
        log::info!(
            "Initial shader build complete: {} compiled, {} failed",
            report.compiled.len(),
            report.failed.len()
        );
        let last_report = Arc::new(Mutex::new(report));

        let mut handler = RebuildHandler {
            driver,
            debounce: Duration::from_millis(debounce_ms),
            last_build_time: None,
            last_report: last_report.clone(),
            rebuild_tx,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => handler.handle(&event),
                Err(e) => log::warn!("Shader watch error: {}", e),
            },
            Config::default().with_poll_interval(Duration::from_millis(debounce_ms.max(1))),
        )?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        log::info!("Watching shaders in {}", root.display());

        Ok(Self {
            _watcher: watcher,
            rebuild_receiver: Mutex::new(rebuild_rx),
            last_report,
        })
    }

    /// Checks whether a rebuild has finished since the last check.
    ///
    /// Non-blocking; drains every pending signal.
    #[inline]
    pub fn check_for_rebuild(&self) -> bool {
        let receiver = self.rebuild_receiver.lock();
        let mut has_rebuild = false;
        while receiver.try_recv().is_ok() {
            has_rebuild = true;
        }
        has_rebuild
    }

    /// Report of the most recent build, initial or watch-triggered.
    pub fn last_report(&self) -> BuildReport {
        self.last_report.lock().clone()
    }
}

/// Reacts to filesystem events by rerunning the whole build, debounced.
struct RebuildHandler {
    driver: Arc<ShaderBuildDriver>,
    debounce: Duration,
    last_build_time: Option<Instant>,
    last_report: Arc<Mutex<BuildReport>>,
    rebuild_tx: Sender<()>,
}

impl RebuildHandler {
    fn handle(&mut self, event: &Event) {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }

        let touches_shader = event
            .paths
            .iter()
            .any(|p| ShaderSource::from_path(p).is_some());
        if !touches_shader {
            return;
        }

        // Measured from the end of the last rebuild so events queued while it
        // ran don't trigger another one straight away.
        if let Some(last) = self.last_build_time {
            if last.elapsed() < self.debounce {
                return;
            }
        }

        log::info!("Shader source changed, rebuilding...");
        let report = self.driver.run();
        self.last_build_time = Some(Instant::now());
        log::info!(
            "Shader rebuild complete: {} compiled, {} failed",
            report.compiled.len(),
            report.failed.len()
        );
        *self.last_report.lock() = report;
        let _ = self.rebuild_tx.send(());
    }
}
