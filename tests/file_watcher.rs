use std::fs;
use std::time::{Duration, Instant};

use tempfile::tempdir;
use textoverlay::FileWatcher;

const DEBOUNCE: Duration = Duration::from_millis(200);

#[test]
fn rapid_changes_deliver_final_content_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.txt");
    let mut watcher = FileWatcher::new(&path, "").with_debounce(DEBOUNCE);
    let t0 = Instant::now();

    for (i, content) in ["one", "one two", "one two three"].iter().enumerate() {
        fs::write(&path, content).unwrap();
        watcher.notify_changed(t0 + Duration::from_millis(50 * i as u64));
    }

    // Last notification at t0+100ms pushes the deadline to t0+300ms
    assert_eq!(watcher.poll(t0 + Duration::from_millis(250)), None);
    assert_eq!(
        watcher.poll(t0 + Duration::from_millis(301)).as_deref(),
        Some("one two three")
    );
    assert_eq!(watcher.poll(t0 + Duration::from_millis(600)), None);
}

#[test]
fn identical_content_is_not_delivered() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.txt");
    fs::write(&path, "same").unwrap();
    let mut watcher = FileWatcher::new(&path, "same").with_debounce(DEBOUNCE);

    let t0 = Instant::now();
    watcher.notify_changed(t0);
    assert_eq!(watcher.poll(t0 + DEBOUNCE), None);
}

#[test]
fn paused_watcher_drops_notifications() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.txt");
    let mut watcher = FileWatcher::new(&path, "").with_debounce(DEBOUNCE);

    watcher.pause();
    fs::write(&path, "written by us").unwrap();
    watcher.set_last_contents("written by us");
    let t0 = Instant::now();
    watcher.notify_changed(t0);
    watcher.resume();
    assert_eq!(watcher.poll(t0 + DEBOUNCE * 2), None);

    fs::write(&path, "written by someone else").unwrap();
    watcher.notify_changed(t0 + DEBOUNCE * 3);
    assert_eq!(
        watcher.poll(t0 + DEBOUNCE * 4).as_deref(),
        Some("written by someone else")
    );
}

#[test]
fn start_and_stop_toggle_running() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.txt");
    fs::write(&path, "initial").unwrap();
    let mut watcher = FileWatcher::new(&path, "");

    watcher.start(&path).unwrap();
    assert!(watcher.is_running());
    // A fresh start reads the file on the next poll
    assert_eq!(watcher.poll(Instant::now()).as_deref(), Some("initial"));

    watcher.stop();
    assert!(!watcher.is_running());
}
