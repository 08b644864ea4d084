#![forbid(unsafe_code)]

//! Pure kinematics of the panel.
//!
//! Every function here is a pure function of its arguments: the live
//! coordinate from a drag translation, the backdrop dimming factor, the
//! positions being approached and departed, the fling projection, the
//! target position decision and the removal decision.
//!
//! # Invariants
//!
//! 1. [`directional_position`], [`redirectional_position`] and
//!    [`target_position`] only ever return members of the layout's supported
//!    set.
//! 2. [`backdrop_alpha`] stays between the alphas of the departed and
//!    approached positions.
//! 3. [`current_coordinate`] stays within the buffered bounds, and within
//!    the strict bounds while a live drag moves the panel upward.
//!
//! # Failure Modes
//!
//! - Empty supported set: the position lookups panic. A panel must never be
//!   asked to settle into an undefined position.
//! - Degenerate geometry (two positions on one coordinate, or the settled
//!   position on the safe-area bottom): guarded, never divides by zero.
//! - Out-of-range behavior thresholds: clamped before use.

use crate::behavior::Behavior;
use crate::layout::LayoutAdapter;
use crate::position::{Position, PositionSet};

/// Deceleration rate of a normally decelerating scroll view, per millisecond.
pub const DECELERATION_RATE_NORMAL: f64 = 0.998;

/// Cap on the relative velocity handed to a settle animation.
pub const MAX_SETTLE_VELOCITY: f64 = 30.0;

// ---------------------------------------------------------------------------
// Coordinate tracking
// ---------------------------------------------------------------------------

/// Travel bounds of the surface's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Coordinate of the most open supported position.
    pub top: f64,
    /// Coordinate of the most closed supported position.
    pub bottom: f64,
    /// Overshoot allowed above `top`.
    pub top_buffer: f64,
    /// Overshoot allowed below `bottom`.
    pub bottom_buffer: f64,
}

impl Bounds {
    /// Read the bounds from a layout.
    #[must_use]
    pub fn of<L: LayoutAdapter + ?Sized>(layout: &L) -> Self {
        Self {
            top: layout.top_y(),
            bottom: layout.bottom_y(),
            top_buffer: layout.top_interaction_buffer(),
            bottom_buffer: layout.bottom_interaction_buffer(),
        }
    }
}

/// Inputs for [`current_coordinate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Surface top edge when the interaction started.
    pub initial_origin_y: f64,
    /// Raw vertical drag translation.
    pub translation_y: f64,
    /// Translation at which tracking began.
    pub translation_offset: f64,
    /// Surface top edge before this sample is applied.
    pub previous_origin_y: f64,
    /// Whether the drag is in its `Changed` phase.
    pub is_drag_live: bool,
}

/// Live coordinate of the surface's top edge for a drag sample.
///
/// While the drag is live and the panel sits below the container top and is
/// still moving up, the result is clamped strictly to `[top, bottom]`.
/// Otherwise it may overshoot by the interaction buffers.
#[must_use]
pub fn current_coordinate(sample: &DragSample, bounds: &Bounds) -> f64 {
    let y = sample.initial_origin_y + (sample.translation_y - sample.translation_offset);

    if sample.is_drag_live {
        let pre_y = sample.previous_origin_y;
        if pre_y > 0.0 && pre_y > y {
            return y.min(bounds.bottom).max(bounds.top);
        }
    }
    // min/max rather than clamp: a misconfigured layout may invert the bounds.
    y.min(bounds.bottom + bounds.bottom_buffer)
        .max(bounds.top - bounds.top_buffer)
}

// ---------------------------------------------------------------------------
// Position lookup
// ---------------------------------------------------------------------------

/// Shape of the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrangement {
    Single(Position),
    /// More open first.
    Pair(Position, Position),
    Triple,
}

fn arrangement(supported: PositionSet) -> Arrangement {
    let mut members = supported.positions();
    match (members.next(), members.next(), members.next()) {
        (Some(only), None, _) => Arrangement::Single(only),
        (Some(open), Some(closed), None) => Arrangement::Pair(open, closed),
        (Some(_), Some(_), Some(_)) => Arrangement::Triple,
        (None, _, _) => panic!("panel layout supports no positions"),
    }
}

/// The position the panel is moving toward.
#[must_use]
pub fn directional_position<L: LayoutAdapter + ?Sized>(
    layout: &L,
    state: Position,
    translation_y: f64,
    current_y: f64,
) -> Position {
    match arrangement(layout.supported_positions()) {
        Arrangement::Single(only) => only,
        Arrangement::Pair(open, closed) => {
            if translation_y >= 0.0 {
                closed
            } else {
                open
            }
        }
        Arrangement::Triple => {
            let middle_y = layout.middle_y();
            match state {
                Position::Full => {
                    if translation_y <= 0.0 {
                        Position::Full
                    } else if current_y > middle_y {
                        Position::Tip
                    } else {
                        Position::Half
                    }
                }
                Position::Half => {
                    if translation_y >= 0.0 {
                        Position::Tip
                    } else {
                        Position::Full
                    }
                }
                Position::Tip => {
                    if translation_y >= 0.0 {
                        Position::Tip
                    } else if current_y > middle_y {
                        Position::Half
                    } else {
                        Position::Full
                    }
                }
            }
        }
    }
}

/// The position the panel is moving away from.
#[must_use]
pub fn redirectional_position<L: LayoutAdapter + ?Sized>(
    layout: &L,
    state: Position,
    translation_y: f64,
    current_y: f64,
) -> Position {
    match arrangement(layout.supported_positions()) {
        Arrangement::Single(only) => only,
        Arrangement::Pair(open, closed) => {
            if translation_y >= 0.0 {
                open
            } else {
                closed
            }
        }
        Arrangement::Triple => {
            let middle_y = layout.middle_y();
            match state {
                Position::Full => {
                    if current_y > middle_y {
                        Position::Half
                    } else {
                        Position::Full
                    }
                }
                Position::Half => Position::Half,
                Position::Tip => {
                    if current_y > middle_y {
                        Position::Tip
                    } else {
                        Position::Half
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Backdrop
// ---------------------------------------------------------------------------

/// Backdrop opacity at `current_y`, interpolated between the departed and
/// the approached position.
#[must_use]
pub fn backdrop_alpha<L: LayoutAdapter + ?Sized>(
    layout: &L,
    state: Position,
    translation_y: f64,
    current_y: f64,
) -> f64 {
    let next = directional_position(layout, state, translation_y, current_y);
    let pre = redirectional_position(layout, state, translation_y, current_y);
    let next_y = layout.position_y(next);
    let pre_y = layout.position_y(pre);
    let next_alpha = layout.backdrop_alpha(next);
    let pre_alpha = layout.backdrop_alpha(pre);

    if pre_y == next_y {
        return pre_alpha;
    }
    let progress = clamp_unit(1.0 - (next_y - current_y) / (next_y - pre_y));
    pre_alpha + progress * (next_alpha - pre_alpha)
}

// ---------------------------------------------------------------------------
// Targeting
// ---------------------------------------------------------------------------

/// Additional travel after release under normal deceleration.
///
/// `initial_velocity` is in points per second.
#[inline]
#[must_use]
pub fn project(initial_velocity: f64) -> f64 {
    let rate = DECELERATION_RATE_NORMAL;
    (initial_velocity / 1000.0) * rate / (1.0 - rate)
}

/// The position the panel should settle into after release.
///
/// # Panics
///
/// Panics if the layout supports no positions.
#[must_use]
pub fn target_position<L, B>(
    layout: &L,
    behavior: &B,
    state: Position,
    current_y: f64,
    velocity_y: f64,
) -> Position
where
    L: LayoutAdapter + ?Sized,
    B: Behavior + ?Sized,
{
    match arrangement(layout.supported_positions()) {
        Arrangement::Single(only) => only,
        Arrangement::Pair(open, closed) => {
            pair_target(layout, behavior, state, open, closed, current_y, velocity_y)
        }
        Arrangement::Triple => triple_target(layout, behavior, state, current_y, velocity_y),
    }
}

fn pair_target<L, B>(
    layout: &L,
    behavior: &B,
    state: Position,
    top: Position,
    bottom: Position,
    current_y: f64,
    velocity_y: f64,
) -> Position
where
    L: LayoutAdapter + ?Sized,
    B: Behavior + ?Sized,
{
    let top_y = layout.position_y(top);
    let bottom_y = layout.position_y(bottom);

    let target = if top == state { bottom } else { top };
    let progress = clamp_unit(behavior.redirectional_progress(state, target));
    let th = top_y + (bottom_y - top_y) * progress;
    let projection = project(velocity_y);

    if current_y < th {
        if projection >= bottom_y - current_y {
            bottom
        } else {
            top
        }
    } else if projection <= top_y - current_y {
        top
    } else {
        bottom
    }
}

//  [top_y|full]---[th1]---[middle_y|half]---[th2]---[bottom_y|tip]
fn triple_target<L, B>(
    layout: &L,
    behavior: &B,
    state: Position,
    current_y: f64,
    velocity_y: f64,
) -> Position
where
    L: LayoutAdapter + ?Sized,
    B: Behavior + ?Sized,
{
    let top_y = layout.top_y();
    let middle_y = layout.middle_y();
    let bottom_y = layout.bottom_y();

    let (target, forward) = match state {
        Position::Full => (Position::Half, true),
        Position::Half if current_y < middle_y => (Position::Full, false),
        Position::Half => (Position::Tip, true),
        Position::Tip => (Position::Half, false),
    };

    let progress = clamp_unit(behavior.redirectional_progress(state, target));
    let (th1, th2) = if forward {
        (
            top_y + (middle_y - top_y) * progress,
            middle_y + (bottom_y - middle_y) * progress,
        )
    } else {
        (
            middle_y - (middle_y - top_y) * progress,
            bottom_y - (bottom_y - middle_y) * progress,
        )
    };

    let projection = project(velocity_y);
    // Boundary inclusivity decides the snap direction at exact thresholds.
    if current_y < th1 {
        if projection >= middle_y - current_y {
            Position::Half
        } else {
            Position::Full
        }
    } else if current_y <= middle_y {
        if projection <= top_y - current_y {
            Position::Full
        } else {
            Position::Half
        }
    } else if current_y < th2 {
        if projection >= bottom_y - current_y {
            Position::Tip
        } else {
            Position::Half
        }
    } else if projection <= middle_y - current_y {
        Position::Half
    } else {
        Position::Tip
    }
}

/// Remaining travel from `current_y` to `target`.
#[inline]
#[must_use]
pub fn distance<L: LayoutAdapter + ?Sized>(layout: &L, target: Position, current_y: f64) -> f64 {
    (current_y - layout.position_y(target)).abs()
}

/// Relative velocity for a settle animation covering `distance`.
#[must_use]
pub fn settle_velocity(velocity_y: f64, distance: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    (velocity_y / distance)
        .min(MAX_SETTLE_VELOCITY)
        .max(-MAX_SETTLE_VELOCITY)
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

/// Inputs for [`removal_velocity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalInput {
    /// Coordinate of the settled position.
    pub settled_y: f64,
    pub current_y: f64,
    pub safe_area_bottom_y: f64,
    /// Release velocity, points per second.
    pub velocity_y: f64,
    /// Distance to the settle target.
    pub distance: f64,
    /// Relative velocity that forces removal (clamped to `>= 0`).
    pub velocity_threshold: f64,
    /// Progress that forces removal (clamped to `[0, 1]`).
    pub progress_threshold: f64,
}

/// Decide whether a release removes the panel.
///
/// Returns the relative downward velocity for the removal animation when
/// removal is accepted, `None` otherwise.
#[must_use]
pub fn removal_velocity(input: &RemovalInput) -> Option<f64> {
    let vth = input.velocity_threshold.max(0.0);
    let pth = clamp_unit(input.progress_threshold);
    let dy = if input.distance != 0.0 {
        (input.velocity_y / input.distance).min(vth).max(0.0)
    } else {
        0.0
    };

    let span = input.safe_area_bottom_y - input.settled_y;
    if span == 0.0 {
        return None;
    }
    let progress = (input.current_y - input.settled_y) / span;
    if progress >= pth || dy == vth {
        Some(dy)
    } else {
        None
    }
}

#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.min(1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::DefaultBehavior;
    use crate::layout::{Anchor, StaticLayout};

    fn three() -> StaticLayout {
        StaticLayout::empty(400.0, 480.0)
            .with_anchor(Position::Full, Anchor::new(0.0, 0.4))
            .with_anchor(Position::Half, Anchor::new(200.0, 0.1))
            .with_anchor(Position::Tip, Anchor::new(400.0, 0.0))
    }

    fn full_half() -> StaticLayout {
        StaticLayout::empty(400.0, 480.0)
            .with_anchor(Position::Full, Anchor::new(0.0, 0.5))
            .with_anchor(Position::Half, Anchor::new(300.0, 0.0))
            .with_initial_position(Position::Full)
    }

    fn tip_only() -> StaticLayout {
        StaticLayout::empty(400.0, 480.0)
            .with_anchor(Position::Tip, Anchor::new(350.0, 0.2))
            .with_initial_position(Position::Tip)
    }

    fn progress(p: f64) -> DefaultBehavior {
        DefaultBehavior {
            redirectional_progress: p,
            ..DefaultBehavior::default()
        }
    }

    fn bounds() -> Bounds {
        Bounds {
            top: 0.0,
            bottom: 400.0,
            top_buffer: 6.0,
            bottom_buffer: 6.0,
        }
    }

    #[test]
    fn coordinate_applies_translation_delta() {
        let sample = DragSample {
            initial_origin_y: 200.0,
            translation_y: 80.0,
            translation_offset: 30.0,
            previous_origin_y: 200.0,
            is_drag_live: true,
        };
        assert_eq!(current_coordinate(&sample, &bounds()), 250.0);
    }

    #[test]
    fn coordinate_overshoots_into_buffers_when_not_rising() {
        let sample = DragSample {
            initial_origin_y: 200.0,
            translation_y: 300.0,
            translation_offset: 0.0,
            previous_origin_y: 390.0,
            is_drag_live: true,
        };
        assert_eq!(current_coordinate(&sample, &bounds()), 406.0);

        let up = DragSample {
            initial_origin_y: 10.0,
            translation_y: -100.0,
            is_drag_live: false,
            ..sample
        };
        assert_eq!(current_coordinate(&up, &bounds()), -6.0);
    }

    #[test]
    fn coordinate_is_strict_while_rising_live() {
        let sample = DragSample {
            initial_origin_y: 10.0,
            translation_y: -100.0,
            translation_offset: 0.0,
            previous_origin_y: 5.0,
            is_drag_live: true,
        };
        assert_eq!(current_coordinate(&sample, &bounds()), 0.0);

        // At the container top the strict clamp no longer applies.
        let at_top = DragSample {
            previous_origin_y: 0.0,
            ..sample
        };
        assert_eq!(current_coordinate(&at_top, &bounds()), -6.0);
    }

    #[test]
    fn pair_lookup_follows_drag_direction() {
        let layout = full_half();
        assert_eq!(directional_position(&layout, Position::Full, 10.0, 50.0), Position::Half);
        assert_eq!(redirectional_position(&layout, Position::Full, 10.0, 50.0), Position::Full);
        assert_eq!(directional_position(&layout, Position::Half, -1.0, 50.0), Position::Full);
        assert_eq!(redirectional_position(&layout, Position::Half, -1.0, 50.0), Position::Half);
        // Zero translation counts as downward.
        assert_eq!(directional_position(&layout, Position::Half, 0.0, 50.0), Position::Half);
    }

    #[test]
    fn triple_directional_table() {
        let l = three();
        use Position::*;
        let cases = [
            (Full, -5.0, 10.0, Full),
            (Full, 0.0, 10.0, Full),
            (Full, 5.0, 150.0, Half),
            (Full, 5.0, 200.0, Half),
            (Full, 5.0, 250.0, Tip),
            (Half, 0.0, 200.0, Tip),
            (Half, -1.0, 200.0, Full),
            (Tip, 0.0, 390.0, Tip),
            (Tip, -5.0, 250.0, Half),
            (Tip, -5.0, 200.0, Full),
        ];
        for (state, t, y, expected) in cases {
            assert_eq!(directional_position(&l, state, t, y), expected, "{state} t={t} y={y}");
        }
    }

    #[test]
    fn triple_redirectional_table() {
        let l = three();
        use Position::*;
        let cases = [
            (Full, 5.0, 150.0, Full),
            (Full, 5.0, 250.0, Half),
            (Half, 5.0, 250.0, Half),
            (Half, -5.0, 50.0, Half),
            (Tip, -5.0, 250.0, Tip),
            (Tip, -5.0, 200.0, Half),
        ];
        for (state, t, y, expected) in cases {
            assert_eq!(redirectional_position(&l, state, t, y), expected, "{state} t={t} y={y}");
        }
    }

    #[test]
    fn single_position_is_degenerate() {
        let l = tip_only();
        let b = progress(0.5);
        for (t, y, v) in [(-200.0, 10.0, -5000.0), (0.0, 350.0, 0.0), (90.0, 400.0, 9000.0)] {
            assert_eq!(directional_position(&l, Position::Tip, t, y), Position::Tip);
            assert_eq!(redirectional_position(&l, Position::Tip, t, y), Position::Tip);
            assert_eq!(target_position(&l, &b, Position::Tip, y, v), Position::Tip);
        }
        assert_eq!(backdrop_alpha(&l, Position::Tip, 40.0, 300.0), 0.2);
    }

    #[test]
    fn coincident_positions_keep_departed_alpha() {
        let l = StaticLayout::empty(400.0, 480.0)
            .with_anchor(Position::Half, Anchor::new(300.0, 0.2))
            .with_anchor(Position::Tip, Anchor::new(300.0, 0.7));
        // Downward drags depart the more open member, upward drags the other.
        assert_eq!(backdrop_alpha(&l, Position::Half, 10.0, 300.0), 0.2);
        assert_eq!(backdrop_alpha(&l, Position::Half, 0.0, 300.0), 0.2);
        assert_eq!(backdrop_alpha(&l, Position::Tip, -10.0, 300.0), 0.7);
        assert_eq!(backdrop_alpha(&l, Position::Half, -10.0, 300.0), 0.7);

        let b = progress(0.5);
        for (state, v) in [(Position::Half, 0.0), (Position::Tip, 800.0), (Position::Half, -800.0)] {
            let target = target_position(&l, &b, state, 300.0, v);
            assert!(l.supported_positions().has(target), "target: {target}");
            assert_eq!(distance(&l, target, 300.0), 0.0);
        }
    }

    #[test]
    fn alpha_interpolates_between_departed_and_approached() {
        let l = three();
        // Leaving half toward full, halfway there.
        let alpha = backdrop_alpha(&l, Position::Half, -10.0, 100.0);
        assert!((alpha - 0.25).abs() < 1e-12, "alpha: {alpha}");
        // Overshooting past full saturates at full's alpha.
        assert!((backdrop_alpha(&l, Position::Half, -10.0, -6.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn projection_matches_normal_deceleration() {
        assert!((project(1000.0) - 499.0).abs() < 1e-9);
        assert_eq!(project(0.0), 0.0);
        assert!(project(-1000.0) < 0.0);
    }

    #[test]
    fn three_position_scenario_settles_at_half() {
        // th1 = 100, th2 = 300; 150 falls in th1..=middle.
        let l = three();
        assert_eq!(target_position(&l, &progress(0.5), Position::Half, 150.0, 0.0), Position::Half);
    }

    #[test]
    fn two_position_scenario_settles_back() {
        // th = 90; 50 < 90 and no fling.
        let l = full_half();
        assert_eq!(target_position(&l, &progress(0.3), Position::Full, 50.0, 0.0), Position::Full);
        // Past the threshold the panel commits to half.
        assert_eq!(target_position(&l, &progress(0.3), Position::Full, 95.0, 0.0), Position::Half);
    }

    #[test]
    fn fling_carries_past_threshold() {
        let l = full_half();
        // project(600) = 299.4 >= 300 - 1 = 299
        assert_eq!(target_position(&l, &progress(0.3), Position::Full, 1.0, 600.0), Position::Half);
        // Upward fling from below the threshold returns to full.
        assert_eq!(target_position(&l, &progress(0.3), Position::Full, 150.0, -400.0), Position::Full);
    }

    #[test]
    fn triple_zone_boundaries_are_load_bearing() {
        let l = three();
        let b = progress(0.5);
        // From full (forward): th1 = 100, th2 = 300.
        assert_eq!(target_position(&l, &b, Position::Full, 99.9, 0.0), Position::Full);
        assert_eq!(target_position(&l, &b, Position::Full, 100.0, 0.0), Position::Half);
        assert_eq!(target_position(&l, &b, Position::Full, 200.0, 0.0), Position::Half);
        assert_eq!(target_position(&l, &b, Position::Full, 299.9, 0.0), Position::Half);
        assert_eq!(target_position(&l, &b, Position::Full, 300.0, 0.0), Position::Tip);
        // Exactly at middle with zero projection: `<= top - y` is 0 <= -200, stays half.
        assert_eq!(target_position(&l, &b, Position::Tip, 200.0, 0.0), Position::Half);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let l = full_half();
        // Progress 7 behaves as 1: threshold at half's coordinate.
        assert_eq!(target_position(&l, &progress(7.0), Position::Full, 299.0, 0.0), Position::Full);
        // Progress -3 behaves as 0: threshold at full's coordinate.
        assert_eq!(target_position(&l, &progress(-3.0), Position::Full, 1.0, 0.0), Position::Half);
    }

    #[test]
    #[should_panic(expected = "supports no positions")]
    fn empty_layout_is_fatal() {
        let l = StaticLayout::empty(400.0, 480.0);
        let _ = target_position(&l, &progress(0.5), Position::Half, 0.0, 0.0);
    }

    #[test]
    fn distance_is_absolute() {
        let l = three();
        assert_eq!(distance(&l, Position::Full, 150.0), 150.0);
        assert_eq!(distance(&l, Position::Tip, 150.0), 250.0);
    }

    #[test]
    fn settle_velocity_is_capped() {
        assert_eq!(settle_velocity(500.0, 0.0), 0.0);
        assert_eq!(settle_velocity(500.0, 100.0), 5.0);
        assert_eq!(settle_velocity(-9000.0, 100.0), -30.0);
    }

    fn removal(current_y: f64, velocity_y: f64, distance: f64) -> RemovalInput {
        RemovalInput {
            settled_y: 300.0,
            current_y,
            safe_area_bottom_y: 500.0,
            velocity_y,
            distance,
            velocity_threshold: 10.0,
            progress_threshold: 0.5,
        }
    }

    #[test]
    fn removal_by_progress() {
        assert_eq!(removal_velocity(&removal(399.0, 0.0, 99.0)), None);
        assert_eq!(removal_velocity(&removal(400.0, 0.0, 100.0)), Some(0.0));
    }

    #[test]
    fn removal_by_saturated_velocity() {
        assert_eq!(removal_velocity(&removal(320.0, 2000.0, 20.0)), Some(10.0));
        assert_eq!(removal_velocity(&removal(320.0, 100.0, 20.0)), None);
        // Upward velocity never counts.
        assert_eq!(removal_velocity(&removal(320.0, -5000.0, 20.0)), None);
    }

    #[test]
    fn removal_guards_degenerate_geometry() {
        let input = RemovalInput {
            safe_area_bottom_y: 300.0,
            ..removal(450.0, 5000.0, 10.0)
        };
        assert_eq!(removal_velocity(&input), None);
    }
}
