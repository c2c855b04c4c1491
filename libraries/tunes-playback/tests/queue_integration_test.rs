//! Integration tests for the queue controller and now-playing tracker
//! against a scripted engine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tunes_core::{Locator, Track};
use tunes_playback::{
    NowPlayingTracker, PlaybackEngine, PlaybackError, QueueController, Result,
};

/// Engine whose reported state is set by the test
#[derive(Default)]
struct ScriptedEngine {
    items: Vec<Locator>,
    index: Option<usize>,
    position: Duration,
    playing: bool,
    released: Arc<AtomicBool>,
}

impl PlaybackEngine for ScriptedEngine {
    fn set_items(&mut self, items: Vec<Locator>) {
        self.index = (!items.is_empty()).then_some(0);
        self.items = items;
        self.position = Duration::ZERO;
    }

    fn prepare(&mut self) -> Result<()> {
        if self.released.load(Ordering::SeqCst) {
            return Err(PlaybackError::Released);
        }
        Ok(())
    }

    fn seek_to_item(&mut self, index: usize, offset: Duration) -> Result<()> {
        self.index = Some(index);
        self.position = offset;
        Ok(())
    }

    fn seek(&mut self, offset: Duration) {
        self.position = offset;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn has_next(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.items.len())
    }

    fn has_previous(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    fn next_item(&mut self) {
        if self.has_next() {
            self.index = self.index.map(|i| i + 1);
            self.position = Duration::ZERO;
        }
    }

    fn previous_item(&mut self) {
        if self.has_previous() {
            self.index = self.index.map(|i| i - 1);
            self.position = Duration::ZERO;
        }
    }

    fn current_index(&self) -> Option<usize> {
        self.index
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn tracks(ids: &[i64]) -> Vec<Track> {
    ids.iter()
        .map(|id| Track::new(*id, format!("Song {}", id), None))
        .collect()
}

#[test]
fn dropping_controller_releases_engine() {
    let released = Arc::new(AtomicBool::new(false));
    let engine = ScriptedEngine {
        released: Arc::clone(&released),
        ..ScriptedEngine::default()
    };

    {
        let mut queue = QueueController::new(engine);
        queue.set_queue(tracks(&[1, 2]), Some(1), true).unwrap();
        assert!(!released.load(Ordering::SeqCst));
    }

    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn engine_released_when_owner_panics() {
    let released = Arc::new(AtomicBool::new(false));
    let engine = ScriptedEngine {
        released: Arc::clone(&released),
        ..ScriptedEngine::default()
    };

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _queue = QueueController::new(engine);
        panic!("screen torn down");
    }));

    assert!(result.is_err());
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn out_of_range_index_keeps_now_playing() {
    let mut queue = QueueController::new(ScriptedEngine::default());
    let first = tracks(&[1, 2, 3]);
    queue.set_queue(first.clone(), Some(2), true).unwrap();

    let mut tracker = NowPlayingTracker::new();
    assert_eq!(tracker.poll(&queue).track.as_ref(), Some(&first[2]));

    // Engine briefly reports an index from the old, longer queue
    queue.set_queue(tracks(&[9]), None, false).unwrap();
    queue.engine_mut().index = Some(2);

    let snapshot = tracker.poll(&queue);
    assert_eq!(snapshot.track.as_ref(), Some(&first[2]));
    assert!(snapshot.is_playing);
}

#[test]
fn failed_prepare_keeps_queue_in_step_with_engine() {
    let mut queue = QueueController::new(ScriptedEngine::default());
    queue.set_queue(tracks(&[1, 2, 3]), Some(2), true).unwrap();

    queue.engine_mut().release();
    let replacement = tracks(&[7, 8]);
    let result = queue.set_queue(replacement.clone(), Some(1), true);

    assert!(matches!(result, Err(PlaybackError::Released)));
    assert_eq!(queue.queue(), replacement.as_slice());
    assert_eq!(queue.engine().item_count(), 2);

    let mut tracker = NowPlayingTracker::new();
    assert_eq!(tracker.poll(&queue).track.as_ref(), Some(&replacement[0]));
}

#[test]
fn now_playing_follows_skips() {
    let mut queue = QueueController::new(ScriptedEngine::default());
    let list = tracks(&[1, 2, 3]);
    queue.set_queue(list.clone(), Some(0), true).unwrap();

    let mut tracker = NowPlayingTracker::new();
    queue.next();
    assert_eq!(tracker.poll(&queue).track.as_ref(), Some(&list[1]));

    queue.previous();
    assert_eq!(tracker.poll(&queue).track.as_ref(), Some(&list[0]));
}

#[test]
fn previous_restart_threshold_is_exclusive() {
    let mut queue = QueueController::new(ScriptedEngine::default());
    queue.set_queue(tracks(&[1, 2]), Some(1), false).unwrap();

    queue.seek_to(Duration::from_millis(3_000));
    queue.previous();
    assert_eq!(queue.engine().current_index(), Some(0));

    queue.next();
    queue.seek_to(Duration::from_millis(3_001));
    queue.previous();
    assert_eq!(queue.engine().current_index(), Some(1));
    assert_eq!(queue.engine().position(), Duration::ZERO);
}
