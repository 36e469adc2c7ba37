//! Pointer-driven drag/resize state machine
//!
//! One [`DragSession`] per gesture: pointer-down begins it, pointer-move
//! feeds it horizontal positions, pointer-up releases it into a final
//! candidate window. All constraint math happens here, in minutes:
//! pixel positions are converted through [`TrackGeometry`], deltas and edges
//! snap to the grid, and candidates are clamped against the nearest
//! neighbor blocks (computed once at pointer-down), the current wall clock
//! when displaying today, and the day edges. Move preserves the block's
//! width; resize moves one edge while the other stays fixed.
//!
//! The session never emits a negative-length interval: when the neighbor
//! bounds leave no room, the candidate collapses to the smallest valid
//! window against the fixed edge.
//!
//! Persistence is NOT this module's job: [`release`](DragSession::release)
//! hands the final window to the adjustment service, which commits and
//! broadcasts it.

use crate::core::EngineConfig;
use crate::timeline::interval::{TimeInterval, snap_minutes, snap_minutes_f64};
use crate::timeline::schedule::Block;
use shared::models::Adjustment;
use shared::types::{DAY_MINUTES, Minute};
use thiserror::Error;
use tracing::trace;

/// Which gesture the pointer started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Drag the whole block; duration is preserved
    Move,
    /// Drag the left edge; end stays fixed
    ResizeStart,
    /// Drag the right edge; start stays fixed
    ResizeEnd,
}

/// Why a gesture was refused at pointer-down
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragRejected {
    /// Moving or re-starting an in-progress seating is not a real-world
    /// action; only the end edge of a seated block may be dragged
    #[error("seated reservation: only the end edge can be adjusted")]
    SeatedBlock,
    /// Spillover blocks are projections of the previous day's stay and are
    /// adjusted from their source day only
    #[error("spillover block is read-only on this day")]
    SpilloverBlock,
}

/// Pixel↔minute conversion for one timeline track
#[derive(Debug, Clone, Copy)]
pub struct TrackGeometry {
    width_px: f64,
}

impl TrackGeometry {
    pub fn new(width_px: f64) -> Self {
        Self {
            width_px: width_px.max(1.0),
        }
    }

    /// Convert a pointer x-offset (pixels from the track's left edge) to a
    /// minute-of-day. Out-of-track and non-finite values clamp into the day.
    pub fn pointer_minutes(&self, x_px: f64) -> f64 {
        let raw = x_px * DAY_MINUTES as f64 / self.width_px;
        if raw.is_finite() {
            raw.clamp(0.0, DAY_MINUTES as f64)
        } else {
            0.0
        }
    }
}

/// Nearest non-overlapping neighbors on the same table, fixed at drag start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborBounds {
    /// End of the closest block that finishes at or before this one starts
    pub prev_end: Minute,
    /// Start of the closest block that begins at or after this one ends
    pub next_start: Minute,
}

impl NeighborBounds {
    /// Unconstrained bounds (alone on the track)
    pub fn open() -> Self {
        Self {
            prev_end: 0,
            next_start: DAY_MINUTES,
        }
    }

    /// Compute bounds for `block_id` against its table row.
    ///
    /// Blocks already overlapping the target are ignored; they cannot act
    /// as clamp walls without trapping the block entirely.
    pub fn around(blocks: &[Block], block_id: &str) -> Self {
        let Some(target) = blocks.iter().find(|b| b.reservation_id == block_id) else {
            return Self::open();
        };
        let mut prev_end = 0;
        let mut next_start = DAY_MINUTES;
        for other in blocks {
            if other.reservation_id == block_id {
                continue;
            }
            if other.interval.end_min <= target.interval.start_min {
                prev_end = prev_end.max(other.interval.end_min);
            }
            if other.interval.start_min >= target.interval.end_min {
                next_start = next_start.min(other.interval.start_min);
            }
        }
        Self {
            prev_end,
            next_start,
        }
    }
}

/// One in-flight drag gesture
#[derive(Debug, Clone)]
pub struct DragSession {
    mode: DragMode,
    track: TrackGeometry,
    initial: TimeInterval,
    /// Block width in minutes (move mode preserves it)
    width_min: Minute,
    /// Pointer position at pointer-down, in minutes
    origin_pointer_min: f64,
    bounds: NeighborBounds,
    /// Current wall-clock minute when the displayed date is today
    now_floor: Option<Minute>,
    seated: bool,
    snap_step: Minute,
    min_block: Minute,
    current: TimeInterval,
    /// Last candidate handed out by `take_frame`
    published: Option<TimeInterval>,
}

impl DragSession {
    /// Begin a gesture on `block`.
    ///
    /// `pointer_x_px` is the pointer's offset from the track's left edge;
    /// `now_floor` is the current minute-of-day iff the timeline shows
    /// today (blocks may not be dragged into the past).
    pub fn begin(
        block: &Block,
        mode: DragMode,
        pointer_x_px: f64,
        track: TrackGeometry,
        bounds: NeighborBounds,
        now_floor: Option<Minute>,
        config: &EngineConfig,
    ) -> Result<Self, DragRejected> {
        if block.spillover {
            return Err(DragRejected::SpilloverBlock);
        }
        if block.seated && matches!(mode, DragMode::Move | DragMode::ResizeStart) {
            return Err(DragRejected::SeatedBlock);
        }

        let step = config.snap_step_minutes;
        let min_block = config.min_block_minutes;

        // Normalize the stored window to a within-day, grid-aligned state;
        // spillover past midnight is only ever created by the explicit
        // extend action, never by dragging.
        let start = snap_minutes(block.interval.start_min.clamp(0, DAY_MINUTES - min_block), step);
        let end = snap_minutes(
            block.interval.end_min.clamp(start + min_block, DAY_MINUTES),
            step,
        );
        let initial = TimeInterval::new(start, end.max(start + min_block));
        let width_min = initial.width().max(min_block);

        Ok(Self {
            mode,
            track,
            initial,
            width_min,
            origin_pointer_min: track.pointer_minutes(pointer_x_px),
            bounds,
            now_floor,
            seated: block.seated,
            snap_step: step,
            min_block,
            current: initial,
            published: None,
        })
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// The candidate window as of the latest pointer position
    pub fn current(&self) -> TimeInterval {
        self.current
    }

    /// Feed a pointer-move. Returns the (possibly unchanged) candidate.
    pub fn pointer_moved(&mut self, pointer_x_px: f64) -> TimeInterval {
        let pointer_min = self.track.pointer_minutes(pointer_x_px);
        let candidate = match self.mode {
            DragMode::Move => self.propose_move(pointer_min),
            DragMode::ResizeStart => self.propose_resize_start(pointer_min),
            DragMode::ResizeEnd => self.propose_resize_end(pointer_min),
        };
        if candidate != self.current {
            trace!(start = candidate.start_min, end = candidate.end_min, "drag candidate");
            self.current = candidate;
        }
        self.current
    }

    /// Live-preview throttle: yields the candidate only when it changed
    /// since the last take, so fast pointer streams coalesce into at most
    /// one pending frame.
    pub fn take_frame(&mut self) -> Option<TimeInterval> {
        if self.published == Some(self.current) {
            return None;
        }
        self.published = Some(self.current);
        Some(self.current)
    }

    /// Pointer-up: the final candidate, as the adjustment to persist.
    ///
    /// A gesture with no net movement releases the identity transform;
    /// committing it is harmless (idempotent upsert).
    pub fn release(self) -> Adjustment {
        Adjustment::new(self.current.start_min, self.current.end_min)
    }

    // ==================== Candidate math ====================

    /// Lowest start allowed by the previous block and the wall clock
    fn floor_start(&self) -> Minute {
        let now_floor = self
            .now_floor
            .map(|m| snap_minutes(m, self.snap_step))
            .unwrap_or(0);
        self.bounds.prev_end.max(now_floor)
    }

    fn propose_move(&self, pointer_min: f64) -> TimeInterval {
        let delta_snap = snap_minutes_f64(pointer_min - self.origin_pointer_min, self.snap_step);
        let lower = self.floor_start().max(0);
        let upper = lower.max(
            (self.bounds.next_start - self.width_min).min(DAY_MINUTES - self.width_min),
        );
        let start = (self.initial.start_min + delta_snap).clamp(lower, upper);
        TimeInterval::new(start, start + self.width_min)
    }

    fn propose_resize_start(&self, pointer_min: f64) -> TimeInterval {
        let snapped = snap_minutes_f64(pointer_min, self.snap_step);
        let lower = self.floor_start();
        let upper = self.initial.end_min - self.min_block;
        let start = if lower > upper {
            // No room: smallest valid window against the fixed end edge
            upper
        } else {
            snapped.clamp(lower, upper)
        };
        TimeInterval::new(start, self.initial.end_min)
    }

    fn propose_resize_end(&self, pointer_min: f64) -> TimeInterval {
        let snapped = snap_minutes_f64(pointer_min, self.snap_step);
        let upper = self.bounds.next_start.min(DAY_MINUTES);
        let mut lower = self.initial.start_min + self.min_block;
        if self.seated {
            if let Some(now) = self.now_floor {
                // A seated block's end may never cross back over the exact
                // clock line
                lower = lower.max(now);
                if upper <= lower {
                    // The clock already passed the next block: no
                    // shortening at all
                    return self.current;
                }
            }
        }
        let end = if upper < lower {
            lower
        } else {
            snapped.clamp(lower, upper)
        };
        TimeInterval::new(self.initial.start_min, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_PX: f64 = 1440.0; // 1px per minute keeps the math readable

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn block(id: &str, start: Minute, end: Minute) -> Block {
        Block {
            reservation_id: id.to_string(),
            guest_name: format!("Guest {}", id),
            guest_count: 2,
            interval: TimeInterval::new(start, end),
            seated: false,
            event: false,
            spillover: false,
        }
    }

    fn seated_block(id: &str, start: Minute, end: Minute) -> Block {
        Block {
            seated: true,
            ..block(id, start, end)
        }
    }

    fn track() -> TrackGeometry {
        TrackGeometry::new(TRACK_PX)
    }

    #[test]
    fn test_neighbor_bounds() {
        let blocks = vec![
            block("a", 600, 660),
            block("b", 700, 760),
            block("c", 800, 860),
        ];
        let bounds = NeighborBounds::around(&blocks, "b");
        assert_eq!(bounds, NeighborBounds { prev_end: 660, next_start: 800 });

        let bounds = NeighborBounds::around(&blocks, "a");
        assert_eq!(bounds, NeighborBounds { prev_end: 0, next_start: 700 });

        let bounds = NeighborBounds::around(&blocks, "c");
        assert_eq!(bounds, NeighborBounds { prev_end: 760, next_start: 1440 });
    }

    #[test]
    fn test_move_preserves_width_and_snaps() {
        let b = block("x", 600, 660);
        let mut session = DragSession::begin(
            &b,
            DragMode::Move,
            630.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        // +23px → +23min → snaps to +25
        let candidate = session.pointer_moved(653.0);
        assert_eq!(candidate, TimeInterval::new(625, 685));
        assert_eq!(candidate.width(), 60);
    }

    #[test]
    fn test_move_clamps_to_neighbors() {
        let b = block("x", 600, 660);
        let bounds = NeighborBounds { prev_end: 570, next_start: 700 };
        let mut session =
            DragSession::begin(&b, DragMode::Move, 630.0, track(), bounds, None, &config())
                .unwrap();

        // Far left: clamped to the previous block's end
        assert_eq!(session.pointer_moved(0.0), TimeInterval::new(570, 630));
        // Far right: clamped so the block stops at the next block's start
        assert_eq!(session.pointer_moved(1400.0), TimeInterval::new(640, 700));
    }

    #[test]
    fn test_move_respects_now_floor() {
        let b = block("x", 600, 660);
        let mut session = DragSession::begin(
            &b,
            DragMode::Move,
            630.0,
            track(),
            NeighborBounds::open(),
            Some(612),
            &config(),
        )
        .unwrap();

        // Dragging into the past stops at the (snapped) clock line
        assert_eq!(session.pointer_moved(0.0), TimeInterval::new(610, 670));
    }

    #[test]
    fn test_move_stops_at_day_end() {
        let b = block("x", 1320, 1380);
        let mut session = DragSession::begin(
            &b,
            DragMode::Move,
            1350.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        assert_eq!(session.pointer_moved(1440.0), TimeInterval::new(1380, 1440));
    }

    #[test]
    fn test_resize_start_clamps_to_prev_block() {
        // A ends 20:00; dragging B's left edge to 19:05 must clamp to 20:00
        let b = block("b", 1230, 1320);
        let bounds = NeighborBounds { prev_end: 1200, next_start: 1440 };
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeStart,
            1230.0,
            track(),
            bounds,
            None,
            &config(),
        )
        .unwrap();

        let candidate = session.pointer_moved(1145.0);
        assert_eq!(candidate, TimeInterval::new(1200, 1320));
    }

    #[test]
    fn test_resize_start_keeps_min_width() {
        let b = block("x", 600, 660);
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeStart,
            600.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        // Dragging past the end edge stops at end - 15
        assert_eq!(session.pointer_moved(1000.0), TimeInterval::new(645, 660));
    }

    #[test]
    fn test_resize_end_clamps_to_next_block_and_midnight() {
        let b = block("x", 600, 660);
        let bounds = NeighborBounds { prev_end: 0, next_start: 700 };
        let mut session =
            DragSession::begin(&b, DragMode::ResizeEnd, 660.0, track(), bounds, None, &config())
                .unwrap();

        assert_eq!(session.pointer_moved(1200.0), TimeInterval::new(600, 700));

        let b = block("y", 1380, 1430);
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeEnd,
            1430.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();
        assert_eq!(session.pointer_moved(1440.0), TimeInterval::new(1380, 1440));
    }

    #[test]
    fn test_resize_end_keeps_min_width() {
        let b = block("x", 600, 660);
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeEnd,
            660.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        assert_eq!(session.pointer_moved(0.0), TimeInterval::new(600, 615));
    }

    #[test]
    fn test_clamp_never_inverts_for_any_pointer() {
        let b = block("x", 600, 660);
        let bounds = NeighborBounds { prev_end: 590, next_start: 680 };
        for mode in [DragMode::Move, DragMode::ResizeStart, DragMode::ResizeEnd] {
            let mut session =
                DragSession::begin(&b, mode, 630.0, track(), bounds, Some(610), &config()).unwrap();
            for px in [-500.0, 0.0, 123.4, 719.9, 1440.0, 2500.0, f64::NAN] {
                let candidate = session.pointer_moved(px);
                assert!(
                    candidate.width() >= 0,
                    "inverted interval {candidate:?} at {px} in {mode:?}"
                );
                assert!(candidate.start_min >= 0 && candidate.end_min <= DAY_MINUTES);
            }
        }
    }

    #[test]
    fn test_seated_block_rejects_move_and_start_resize() {
        let b = seated_block("x", 600, 660);
        for mode in [DragMode::Move, DragMode::ResizeStart] {
            let err = DragSession::begin(
                &b,
                mode,
                630.0,
                track(),
                NeighborBounds::open(),
                Some(620),
                &config(),
            )
            .unwrap_err();
            assert_eq!(err, DragRejected::SeatedBlock);
        }
        assert!(DragSession::begin(
            &b,
            DragMode::ResizeEnd,
            660.0,
            track(),
            NeighborBounds::open(),
            Some(620),
            &config(),
        )
        .is_ok());
    }

    #[test]
    fn test_seated_end_resize_never_crosses_the_clock() {
        let b = seated_block("x", 600, 700);
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeEnd,
            700.0,
            track(),
            NeighborBounds::open(),
            Some(672),
            &config(),
        )
        .unwrap();

        // Shortening stops at the exact clock line, not the snapped one
        assert_eq!(session.pointer_moved(0.0), TimeInterval::new(600, 672));
    }

    #[test]
    fn test_seated_end_resize_frozen_when_neighbor_behind_clock() {
        let b = seated_block("x", 600, 700);
        let bounds = NeighborBounds { prev_end: 0, next_start: 660 };
        let mut session = DragSession::begin(
            &b,
            DragMode::ResizeEnd,
            700.0,
            track(),
            bounds,
            Some(690),
            &config(),
        )
        .unwrap();

        // next_start (660) is already behind the clock (690): no change
        assert_eq!(session.pointer_moved(0.0), TimeInterval::new(600, 700));
        assert_eq!(session.pointer_moved(1440.0), TimeInterval::new(600, 700));
    }

    #[test]
    fn test_spillover_block_is_read_only() {
        let b = Block {
            spillover: true,
            ..block("x", 0, 45)
        };
        for mode in [DragMode::Move, DragMode::ResizeStart, DragMode::ResizeEnd] {
            let err = DragSession::begin(
                &b,
                mode,
                10.0,
                track(),
                NeighborBounds::open(),
                None,
                &config(),
            )
            .unwrap_err();
            assert_eq!(err, DragRejected::SpilloverBlock);
        }
    }

    #[test]
    fn test_take_frame_coalesces_updates() {
        let b = block("x", 600, 660);
        let mut session = DragSession::begin(
            &b,
            DragMode::Move,
            630.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        assert_eq!(session.take_frame(), Some(TimeInterval::new(600, 660)));
        // No movement since: nothing to publish
        assert_eq!(session.take_frame(), None);

        session.pointer_moved(640.0);
        session.pointer_moved(650.0);
        // Two moves, one frame
        assert_eq!(session.take_frame(), Some(TimeInterval::new(620, 680)));
        assert_eq!(session.take_frame(), None);
    }

    #[test]
    fn test_release_without_movement_is_identity() {
        let b = block("x", 600, 660);
        let session = DragSession::begin(
            &b,
            DragMode::Move,
            630.0,
            track(),
            NeighborBounds::open(),
            None,
            &config(),
        )
        .unwrap();

        let adj = session.release();
        assert_eq!((adj.start_min, adj.end_min), (600, 660));
    }
}
