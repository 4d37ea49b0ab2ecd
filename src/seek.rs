use serde::{Deserialize, Serialize};

use crate::{
    capture::{Listener, Listeners, PointerEvent},
    transport::SeekTransport,
};

/// How far from the handle cell a press still grabs it, in columns.
const HANDLE_REACH: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressState {
    pub current: f64,
    pub max: f64,
}

impl ProgressState {
    pub fn new(max: f64) -> Self {
        ProgressState { current: 0.0, max }
    }

    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Geometry of the progress track as last drawn.
///
/// `width` is the span from the first track cell to the last one, so a pointer
/// over the last cell maps to ratio 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub x: f64,
    pub width: f64,
}

impl Track {
    fn is_mounted(&self) -> bool {
        self.width > 0.0
    }

    fn ratio_at(&self, pointer_x: f64) -> f64 {
        (pointer_x - self.x) / self.width
    }

    pub fn handle_x(&self, progress: &ProgressState) -> f64 {
        self.x + (progress.ratio().clamp(0.0, 1.0) * self.width).round()
    }
}

/// Which value a drag commits on release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitTarget {
    /// Where the pointer was released.
    #[default]
    Release,
    /// The position at drag start; the pointer only moves the display.
    DragStart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekPolicy {
    pub commit: CommitTarget,
    pub clamp: bool,
}

impl Default for SeekPolicy {
    fn default() -> Self {
        SeekPolicy {
            commit: CommitTarget::Release,
            clamp: true,
        }
    }
}

struct DragSession {
    pending: Option<f64>,
    _listeners: [Listener; 2],
}

pub struct SeekController {
    progress: ProgressState,
    default_max: f64,
    session: Option<DragSession>,
    policy: SeekPolicy,
    transport: Box<dyn SeekTransport>,
    listeners: Listeners,
}

impl SeekController {
    pub fn new(
        transport: Box<dyn SeekTransport>,
        default_max: f64,
        policy: SeekPolicy,
        listeners: Listeners,
    ) -> Self {
        let max = transport.duration().unwrap_or(default_max);
        SeekController {
            progress: ProgressState::new(max),
            default_max,
            session: None,
            policy,
            transport,
            listeners,
        }
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn pending(&self) -> Option<f64> {
        self.session.as_ref().and_then(|s| s.pending)
    }

    pub fn transport(&self) -> &dyn SeekTransport {
        self.transport.as_ref()
    }

    pub fn transport_mut(&mut self) -> &mut dyn SeekTransport {
        self.transport.as_mut()
    }

    pub fn hits_handle(&self, pointer_x: f64, track: Track) -> bool {
        track.is_mounted() && (pointer_x - track.handle_x(&self.progress)).abs() <= HANDLE_REACH
    }

    pub fn begin_drag(&mut self, pointer_x: f64, track: Option<Track>) {
        if self.session.is_some() {
            return;
        }
        let Some(track) = track.filter(Track::is_mounted) else {
            log::trace!("begin_drag ignored: track not mounted");
            return;
        };
        if !self.hits_handle(pointer_x, track) {
            return;
        }

        log::debug!("seek drag started at {:.0}", self.progress.current);
        self.session = Some(DragSession {
            pending: Some(self.progress.current),
            _listeners: [
                self.listeners.attach(PointerEvent::Move),
                self.listeners.attach(PointerEvent::Release),
            ],
        });
    }

    pub fn on_drag_move(&mut self, pointer_x: f64, track: Option<Track>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(track) = track.filter(Track::is_mounted) else {
            log::trace!("drag move ignored: track not mounted");
            return;
        };

        let mut ratio = track.ratio_at(pointer_x);
        if self.policy.clamp {
            ratio = ratio.clamp(0.0, 1.0);
        }
        let value = ratio * self.progress.max;

        self.progress.current = value;
        if self.policy.commit == CommitTarget::Release {
            session.pending = Some(value);
        }
    }

    pub fn end_drag(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let pending = session.pending;
        drop(session);

        log::debug!("seek drag ended");
        match pending {
            Some(value) => self.commit(value),
            None => log::trace!("drag ended without a staged value"),
        }
    }

    /// Ends a drag without committing anything.
    pub fn cancel_drag(&mut self) {
        if self.session.take().is_some() {
            log::debug!("seek drag cancelled");
        }
    }

    pub fn commit(&mut self, value: f64) {
        self.progress.current = value;
        if let Some(session) = self.session.as_mut() {
            session.pending = None;
        }
        log::info!("seek committed to {value:.0} via {}", self.transport.label());
        if let Err(e) = self.transport.seek(value) {
            log::warn!("seek to {value:.0} failed: {e}");
        }
    }

    pub fn step(&mut self, delta: f64) {
        if self.is_dragging() {
            return;
        }
        let target = (self.progress.current + delta).clamp(0.0, self.progress.max.max(0.0));
        self.commit(target);
    }

    /// Follows the transport clock between drags.
    pub fn sync(&mut self) {
        if self.is_dragging() {
            return;
        }
        if let Some(max) = self.transport.duration() {
            self.progress.max = max;
        }
        if let Some(position) = self.transport.position() {
            self.progress.current = position.min(self.progress.max);
        }
    }

    pub fn replace_transport(&mut self, transport: Box<dyn SeekTransport>) {
        self.cancel_drag();
        let max = transport.duration().unwrap_or(self.default_max);
        self.transport = transport;
        self.progress = ProgressState::new(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;

    const TRACK: Track = Track { x: 0.0, width: 100.0 };

    fn controller(policy: SeekPolicy) -> (SeekController, RecordingTransport, Listeners) {
        let transport = RecordingTransport::default();
        let listeners = Listeners::default();
        let controller = SeekController::new(
            Box::new(transport.clone()),
            100_000.0,
            policy,
            listeners.clone(),
        );
        (controller, transport, listeners)
    }

    fn legacy() -> SeekPolicy {
        SeekPolicy {
            commit: CommitTarget::DragStart,
            clamp: false,
        }
    }

    #[test]
    fn drag_sequences_end_idle_without_listeners() {
        for moves in [vec![], vec![10.0], vec![10.0, 50.0, 120.0, -4.0]] {
            let (mut c, _, listeners) = controller(SeekPolicy::default());
            c.begin_drag(0.0, Some(TRACK));
            assert!(c.is_dragging());
            assert_eq!(listeners.count(), 2);
            for x in moves {
                c.on_drag_move(x, Some(TRACK));
            }
            c.end_drag();
            assert!(!c.is_dragging());
            assert_eq!(listeners.count(), 0);
        }
    }

    #[test]
    fn end_and_move_without_begin_are_noops() {
        let (mut c, transport, listeners) = controller(SeekPolicy::default());
        let before = c.progress();
        c.end_drag();
        c.on_drag_move(70.0, Some(TRACK));
        assert_eq!(c.progress(), before);
        assert!(transport.seeks().is_empty());
        assert_eq!(listeners.count(), 0);
    }

    #[test]
    fn immediate_release_commits_drag_start_value() {
        for policy in [SeekPolicy::default(), legacy()] {
            let (mut c, transport, _) = controller(policy);
            c.commit(25_000.0);
            c.begin_drag(25.0, Some(TRACK));
            assert_eq!(c.pending(), Some(25_000.0));
            c.end_drag();
            assert_eq!(transport.seeks(), vec![25_000.0, 25_000.0]);
            assert_eq!(c.progress().current, 25_000.0);
        }
    }

    #[test]
    fn press_away_from_handle_does_not_start_a_drag() {
        let (mut c, _, listeners) = controller(SeekPolicy::default());
        c.begin_drag(40.0, Some(TRACK));
        assert!(!c.is_dragging());
        assert_eq!(listeners.count(), 0);
    }

    #[test]
    fn unmounted_track_is_ignored() {
        let (mut c, _, _) = controller(SeekPolicy::default());
        c.begin_drag(0.0, None);
        assert!(!c.is_dragging());
        c.begin_drag(0.0, Some(Track { x: 0.0, width: 0.0 }));
        assert!(!c.is_dragging());

        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(50.0, None);
        assert_eq!(c.progress().current, 0.0);
    }

    #[test]
    fn move_to_track_end_displays_max() {
        let (mut c, _, _) = controller(SeekPolicy::default());
        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(100.0, Some(TRACK));
        assert_eq!(c.progress().current, 100_000.0);
    }

    #[test]
    fn clamped_move_past_the_track_stays_in_range() {
        let (mut c, _, _) = controller(SeekPolicy::default());
        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(150.0, Some(TRACK));
        assert_eq!(c.progress().current, 100_000.0);
        c.on_drag_move(-20.0, Some(TRACK));
        assert_eq!(c.progress().current, 0.0);
    }

    #[test]
    fn unclamped_move_past_the_track_exceeds_max() {
        let (mut c, _, _) = controller(legacy());
        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(150.0, Some(TRACK));
        assert!(c.progress().current > 100_000.0);
    }

    #[test]
    fn release_target_commits_the_release_position() {
        let (mut c, transport, _) = controller(SeekPolicy::default());
        c.begin_drag(1.0, Some(TRACK));
        c.on_drag_move(30.0, Some(TRACK));
        c.on_drag_move(60.0, Some(TRACK));
        c.end_drag();
        assert_eq!(transport.seeks(), vec![60_000.0]);
        assert_eq!(c.progress().current, 60_000.0);
    }

    #[test]
    fn drag_start_target_snaps_back_on_release() {
        let (mut c, transport, _) = controller(legacy());
        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(60.0, Some(TRACK));
        assert_eq!(c.progress().current, 60_000.0);
        assert_eq!(c.pending(), Some(0.0));
        c.end_drag();
        assert_eq!(transport.seeks(), vec![0.0]);
        assert_eq!(c.progress().current, 0.0);
    }

    #[test]
    fn moves_never_reach_the_transport() {
        let (mut c, transport, _) = controller(SeekPolicy::default());
        c.begin_drag(0.0, Some(TRACK));
        for x in 0..100 {
            c.on_drag_move(f64::from(x), Some(TRACK));
        }
        assert!(transport.seeks().is_empty());
    }

    #[test]
    fn track_offset_is_respected() {
        let track = Track { x: 10.0, width: 40.0 };
        let (mut c, transport, _) = controller(SeekPolicy::default());
        c.begin_drag(10.0, Some(track));
        c.on_drag_move(30.0, Some(track));
        c.end_drag();
        assert_eq!(transport.seeks(), vec![50_000.0]);
    }

    #[test]
    fn failed_transport_keeps_local_value() {
        let transport = RecordingTransport {
            fail: true,
            ..Default::default()
        };
        let mut c = SeekController::new(
            Box::new(transport.clone()),
            1_000.0,
            SeekPolicy::default(),
            Listeners::default(),
        );
        c.commit(400.0);
        assert_eq!(c.progress().current, 400.0);
        assert_eq!(transport.seeks(), vec![400.0]);
    }

    #[test]
    fn step_is_clamped_and_ignored_while_dragging() {
        let (mut c, transport, _) = controller(SeekPolicy::default());
        c.step(-5_000.0);
        c.step(250_000.0);
        assert_eq!(transport.seeks(), vec![0.0, 100_000.0]);

        c.commit(0.0);
        c.begin_drag(0.0, Some(TRACK));
        c.step(5_000.0);
        assert_eq!(c.progress().current, 0.0);
    }

    #[test]
    fn dropping_mid_drag_releases_listeners() {
        let (mut c, _, listeners) = controller(SeekPolicy::default());
        c.begin_drag(0.0, Some(TRACK));
        assert_eq!(listeners.count(), 2);
        drop(c);
        assert_eq!(listeners.count(), 0);
    }

    #[test]
    fn replacing_transport_cancels_drag_and_resets_progress() {
        let (mut c, first, listeners) = controller(SeekPolicy::default());
        c.begin_drag(0.0, Some(TRACK));
        c.on_drag_move(50.0, Some(TRACK));

        let second = RecordingTransport {
            duration: Some(42_000.0),
            ..Default::default()
        };
        c.replace_transport(Box::new(second.clone()));

        assert!(!c.is_dragging());
        assert_eq!(listeners.count(), 0);
        assert_eq!(c.progress(), ProgressState::new(42_000.0));
        assert!(first.seeks().is_empty());
        assert!(second.seeks().is_empty());
    }
}
