// watcher.rs - Debounced Text File Watcher
//
// Observes a single file and hands back its new contents after changes
// settle. The notify backend runs on its own thread and only pushes raw
// events into a channel; everything else happens on the caller's thread
// inside `poll`, which the UI drives from a timer subscription.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::constants::watcher::DEBOUNCE;

struct Backend {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

/// Watches one file; see the module docs for the threading model
pub struct FileWatcher {
    path: PathBuf,
    last_contents: String,
    debounce: Duration,
    paused: bool,
    /// Bumped by every `pause_for_write`; only the latest may resume
    write_hold: u64,
    pending: Option<Instant>,
    backend: Option<Backend>,
}

impl FileWatcher {
    /// A stopped watcher that considers `last_contents` already delivered
    pub fn new(path: impl Into<PathBuf>, last_contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            last_contents: last_contents.into(),
            debounce: DEBOUNCE,
            paused: false,
            write_hold: 0,
            pending: None,
            backend: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Record contents we produced ourselves so they are not echoed back
    pub fn set_last_contents(&mut self, contents: impl Into<String>) {
        self.last_contents = contents.into();
    }

    /// Begin observing `path`, replacing whatever was observed before.
    /// On error the watcher is left stopped.
    pub fn start(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.stop();
        self.path = path.into();

        // Watch the directory: editors that save via rename replace the
        // inode, which would silently end a watch on the file itself.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )
        .context("failed to create file watcher")?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {:?}", dir))?;

        self.backend = Some(Backend {
            _watcher: watcher,
            rx,
        });
        // Pick up the current contents of the new file on the next poll
        self.pending = Some(Instant::now());
        info!("FileWatcher: started, path {:?}", self.path);
        Ok(())
    }

    /// Detach from the file. No-op when not running.
    pub fn stop(&mut self) {
        if self.backend.take().is_some() {
            info!("FileWatcher: stopped");
        }
        self.pending = None;
    }

    /// Keep observing but discard notifications
    pub fn pause(&mut self) {
        debug!("FileWatcher: pause");
        self.paused = true;
        self.pending = None;
    }

    pub fn resume(&mut self) {
        debug!("FileWatcher: resume");
        self.paused = false;
    }

    /// Pause around a write of our own. Returns the token that
    /// `resume_after_write` needs; an older token no longer resumes.
    pub fn pause_for_write(&mut self) -> u64 {
        self.pause();
        self.write_hold += 1;
        self.write_hold
    }

    /// Resume if no later write has paused the watcher again.
    /// Returns whether the watcher was resumed.
    pub fn resume_after_write(&mut self, token: u64) -> bool {
        if token != self.write_hold {
            debug!("FileWatcher: stale resume {} ignored, latest is {}", token, self.write_hold);
            return false;
        }
        self.resume();
        true
    }

    /// Register a change notification received at `now`. Each call pushes
    /// the read deadline out by the debounce interval.
    pub fn notify_changed(&mut self, now: Instant) {
        if self.paused {
            debug!("FileWatcher: change ignored while paused");
            return;
        }
        self.pending = Some(now + self.debounce);
    }

    /// Drain backend events and, once the debounce deadline has passed,
    /// re-read the file. Returns the contents only when they changed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.drain_events(now);

        match self.pending {
            Some(deadline) if deadline <= now => {
                self.pending = None;
                self.read_if_changed()
            }
            _ => None,
        }
    }

    fn drain_events(&mut self, now: Instant) {
        let target = self.path.file_name().map(OsString::from);

        let mut changed = false;
        let mut disconnected = false;
        if let Some(backend) = &self.backend {
            loop {
                match backend.rx.try_recv() {
                    Ok(Ok(event)) => {
                        if is_content_change(&event.kind)
                            && target.as_deref().is_some_and(|name| {
                                event.paths.iter().any(|p| p.file_name() == Some(name))
                            })
                        {
                            changed = true;
                        }
                    }
                    Ok(Err(e)) => warn!("FileWatcher: backend error: {}", e),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        if disconnected {
            error!("FileWatcher: backend disconnected, stopping");
            self.backend = None;
        }
        if changed {
            self.notify_changed(now);
        }
    }

    fn read_if_changed(&mut self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents != self.last_contents => {
                self.last_contents = contents.clone();
                Some(contents)
            }
            Ok(_) => None,
            Err(e) => {
                error!("FileWatcher: error reading watched file {:?}: {}", self.path, e);
                None
            }
        }
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher_for(contents: &str) -> (tempfile::TempDir, PathBuf, FileWatcher) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.txt");
        fs::write(&path, contents).unwrap();
        let watcher = FileWatcher::new(&path, contents);
        (dir, path, watcher)
    }

    #[test]
    fn nothing_before_deadline() {
        let (_dir, path, mut watcher) = watcher_for("a");
        fs::write(&path, "b").unwrap();

        let t0 = Instant::now();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), Some("b".to_string()));
    }

    #[test]
    fn unchanged_contents_are_not_delivered() {
        let (_dir, _path, mut watcher) = watcher_for("same");
        let t0 = Instant::now();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), None);
    }

    #[test]
    fn pause_discards_notifications() {
        let (_dir, path, mut watcher) = watcher_for("a");
        let t0 = Instant::now();

        watcher.notify_changed(t0);
        watcher.pause();
        fs::write(&path, "b").unwrap();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE * 2), None);

        watcher.resume();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), Some("b".to_string()));
    }

    #[test]
    fn read_error_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FileWatcher::new(dir.path().join("gone.txt"), "");
        let t0 = Instant::now();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), None);
    }

    #[test]
    fn own_writes_are_not_echoed() {
        let (_dir, path, mut watcher) = watcher_for("a");
        fs::write(&path, "mine").unwrap();
        watcher.set_last_contents("mine");

        let t0 = Instant::now();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), None);
    }

    #[test]
    fn only_the_latest_write_resumes() {
        let (_dir, path, mut watcher) = watcher_for("a");
        let first = watcher.pause_for_write();
        let second = watcher.pause_for_write();

        assert!(!watcher.resume_after_write(first));
        assert!(watcher.is_paused());
        fs::write(&path, "b").unwrap();
        let t0 = Instant::now();
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), None);

        assert!(watcher.resume_after_write(second));
        assert!(!watcher.is_paused());
        watcher.notify_changed(t0);
        assert_eq!(watcher.poll(t0 + DEBOUNCE), Some("b".to_string()));
    }

    #[test]
    fn start_and_stop_toggle_running() {
        let (_dir, path, mut watcher) = watcher_for("a");
        assert!(!watcher.is_running());
        watcher.start(&path).unwrap();
        assert!(watcher.is_running());
        watcher.stop();
        assert!(!watcher.is_running());
        // stop twice is fine
        watcher.stop();
    }

    /// Poll like the UI tick does until something arrives or `timeout` passes
    fn poll_for(watcher: &mut FileWatcher, timeout: Duration) -> Option<String> {
        let end = Instant::now() + timeout;
        while Instant::now() < end {
            if let Some(contents) = watcher.poll(Instant::now()) {
                return Some(contents);
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        None
    }

    #[test]
    fn backend_delivers_writes_to_the_watched_file_only() {
        let (dir, path, mut watcher) = watcher_for("a");
        watcher.start(&path).unwrap();
        // The check armed by start finds nothing new
        assert_eq!(poll_for(&mut watcher, DEBOUNCE), None);

        fs::write(&path, "b").unwrap();
        assert_eq!(
            poll_for(&mut watcher, Duration::from_secs(5)).as_deref(),
            Some("b")
        );

        fs::write(dir.path().join("sibling.txt"), "noise").unwrap();
        assert_eq!(poll_for(&mut watcher, DEBOUNCE * 3), None);

        watcher.stop();
        fs::write(&path, "c").unwrap();
        assert_eq!(poll_for(&mut watcher, DEBOUNCE * 3), None);
    }

    #[test]
    fn path_without_file_name_still_drains_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FileWatcher::new("", "");
        watcher.start(dir.path().join("..")).unwrap();
        fs::write(dir.path().join("any.txt"), "x").unwrap();
        assert_eq!(poll_for(&mut watcher, DEBOUNCE * 2), None);
        assert!(watcher.is_running());
    }

    #[test]
    fn start_on_missing_directory_fails_and_stays_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FileWatcher::new("unused", "");
        let result = watcher.start(dir.path().join("no_such_dir").join("file.txt"));
        assert!(result.is_err());
        assert!(!watcher.is_running());
    }
}
