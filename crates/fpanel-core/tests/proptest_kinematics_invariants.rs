//! Property-based invariant tests for panel kinematics.
//!
//! These tests verify the structural invariants of the targeting engine:
//!
//! 1. Target selection is a pure function of its inputs
//! 2. Directional/redirectional lookups stay inside the supported set
//! 3. Backdrop alpha stays between the departed and approached alphas
//! 4. A single supported position absorbs every lookup
//! 5. The live coordinate respects the buffered and strict bounds
//! 6. Removal is monotonic in drag progress

use fpanel_core::kinematics::{
    Bounds, DragSample, RemovalInput, backdrop_alpha, current_coordinate, directional_position,
    redirectional_position, removal_velocity, target_position,
};
use fpanel_core::{Anchor, DefaultBehavior, LayoutAdapter, Position, PositionSet, StaticLayout};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Full),
        Just(Position::Half),
        Just(Position::Tip),
    ]
}

fn supported_strategy() -> impl Strategy<Value = PositionSet> {
    (1u8..8).prop_map(PositionSet::from_bits_truncate)
}

/// A layout with increasing coordinates and arbitrary alphas.
fn layout_strategy() -> impl Strategy<Value = StaticLayout> {
    (
        supported_strategy(),
        0.0f64..200.0,
        1.0f64..300.0,
        1.0f64..300.0,
        prop::array::uniform3(0.0f64..=1.0),
        0.0f64..40.0,
        0.0f64..40.0,
    )
        .prop_map(|(supported, top, gap1, gap2, alphas, top_buf, bottom_buf)| {
            let ys = [top, top + gap1, top + gap1 + gap2];
            let mut layout = StaticLayout::empty(ys[2] + 50.0, ys[2] + 120.0)
                .with_interaction_buffers(top_buf, bottom_buf);
            for (i, position) in Position::ALL.into_iter().enumerate() {
                if supported.has(position) {
                    layout = layout.with_anchor(position, Anchor::new(ys[i], alphas[i]));
                }
            }
            let initial = supported.most_open().expect("non-empty set");
            layout.with_initial_position(initial)
        })
}

/// A settled position drawn from the layout's supported set.
fn settled(layout: &StaticLayout, pick: usize) -> Position {
    let members: Vec<Position> = layout.supported_positions().positions().collect();
    members[pick % members.len()]
}

fn behavior(progress: f64) -> DefaultBehavior {
    DefaultBehavior {
        redirectional_progress: progress,
        ..DefaultBehavior::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Idempotent target selection
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn target_selection_is_pure(
        layout in layout_strategy(),
        pick in 0usize..3,
        current_y in -100.0f64..900.0,
        velocity_y in -8000.0f64..8000.0,
        progress in -0.5f64..1.5,
    ) {
        let state = settled(&layout, pick);
        let b = behavior(progress);
        let first = target_position(&layout, &b, state, current_y, velocity_y);
        let second = target_position(&layout, &b, state, current_y, velocity_y);
        prop_assert_eq!(first, second);
        prop_assert!(layout.supported_positions().has(first));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Containment
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lookups_stay_in_supported_set(
        layout in layout_strategy(),
        pick in 0usize..3,
        translation_y in -600.0f64..600.0,
        current_y in -100.0f64..900.0,
    ) {
        let state = settled(&layout, pick);
        let supported = layout.supported_positions();
        prop_assert!(supported.has(directional_position(&layout, state, translation_y, current_y)));
        prop_assert!(supported.has(redirectional_position(&layout, state, translation_y, current_y)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Alpha bounds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn alpha_stays_between_endpoints(
        layout in layout_strategy(),
        pick in 0usize..3,
        translation_y in -600.0f64..600.0,
        current_y in -100.0f64..900.0,
    ) {
        let state = settled(&layout, pick);
        let next = directional_position(&layout, state, translation_y, current_y);
        let pre = redirectional_position(&layout, state, translation_y, current_y);
        let a = layout.backdrop_alpha(next);
        let b = layout.backdrop_alpha(pre);
        let alpha = backdrop_alpha(&layout, state, translation_y, current_y);
        prop_assert!(alpha >= a.min(b) - 1e-9, "alpha {} below [{}, {}]", alpha, a, b);
        prop_assert!(alpha <= a.max(b) + 1e-9, "alpha {} above [{}, {}]", alpha, a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Single-position degeneracy
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_position_absorbs_everything(
        only in position_strategy(),
        y in 0.0f64..600.0,
        translation_y in -600.0f64..600.0,
        current_y in -100.0f64..900.0,
        velocity_y in -8000.0f64..8000.0,
    ) {
        let layout = StaticLayout::empty(700.0, 800.0)
            .with_anchor(only, Anchor::new(y, 0.2))
            .with_initial_position(only);
        let b = behavior(0.5);
        prop_assert_eq!(target_position(&layout, &b, only, current_y, velocity_y), only);
        prop_assert_eq!(directional_position(&layout, only, translation_y, current_y), only);
        prop_assert_eq!(redirectional_position(&layout, only, translation_y, current_y), only);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Coordinate clamping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coordinate_respects_bounds(
        layout in layout_strategy(),
        initial_origin_y in -50.0f64..800.0,
        translation_y in -900.0f64..900.0,
        translation_offset in -100.0f64..100.0,
        previous_origin_y in -50.0f64..800.0,
        is_drag_live in any::<bool>(),
    ) {
        let bounds = Bounds::of(&layout);
        let sample = DragSample {
            initial_origin_y,
            translation_y,
            translation_offset,
            previous_origin_y,
            is_drag_live,
        };
        let y = current_coordinate(&sample, &bounds);
        prop_assert!(y >= bounds.top - bounds.top_buffer);
        prop_assert!(y <= bounds.bottom + bounds.bottom_buffer);

        let raw = initial_origin_y + (translation_y - translation_offset);
        if is_drag_live && previous_origin_y > 0.0 && previous_origin_y > raw {
            prop_assert!(y >= bounds.top && y <= bounds.bottom, "strict clamp violated: {}", y);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Removal monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removal_stays_accepted_further_down(
        settled_y in 0.0f64..400.0,
        span in 1.0f64..400.0,
        current_y in 0.0f64..800.0,
        further in 0.0f64..400.0,
        velocity_y in -3000.0f64..3000.0,
        distance in 0.5f64..300.0,
        progress_threshold in 0.0f64..=1.0,
    ) {
        let input = RemovalInput {
            settled_y,
            current_y,
            safe_area_bottom_y: settled_y + span,
            velocity_y,
            distance,
            velocity_threshold: 10.0,
            progress_threshold,
        };
        if removal_velocity(&input).is_some() {
            let lower = RemovalInput {
                current_y: current_y + further,
                ..input
            };
            prop_assert!(removal_velocity(&lower).is_some());
        }
    }
}
