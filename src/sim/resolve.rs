//! Axis-separated movement resolution
//!
//! The body moves along x first and is pushed out of anything solid it ends up
//! inside, then does the same along y. Resolving one axis completely before the
//! other keeps the push-out direction unambiguous (it is always opposite the
//! axis velocity) and stops diagonal motion from slipping through corners.
//!
//! Obstacles are tested in slice order. When several overlap in the same pass
//! each one clamps in turn against the already-clamped rect, so the last
//! overlapping obstacle decides the final edge.

use glam::Vec2;

use super::body::KinematicBody;
use super::obstacle::Obstacle;

/// Which pass produced a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A solid obstacle the body ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
    /// Index into the obstacle slice passed to [`resolve`]
    pub obstacle: usize,
    pub axis: Axis,
}

/// Playfield limits. Left/right edges clamp, falling past the bottom respawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub width: i32,
    pub height: i32,
}

/// Outcome of a single [`resolve`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionReport {
    /// Touches in the order they were resolved
    pub touches: Vec<Touch>,
    /// Came down onto a solid surface
    pub landed: bool,
    /// Hit something while moving up
    pub bumped_head: bool,
    /// Fell out of the world and was sent back to spawn
    pub respawned: bool,
}

/// Move `body` by `desired_velocity` for one frame against `obstacles`.
///
/// Solidity is read fresh on every call. An axis with zero velocity skips its
/// collision block entirely, so a body resting against a wall never reports
/// that wall again until it pushes into it.
pub fn resolve(
    body: &mut KinematicBody,
    obstacles: &[Obstacle],
    desired_velocity: Vec2,
    bounds: Option<WorldBounds>,
) -> ResolutionReport {
    let mut report = ResolutionReport::default();
    body.velocity = desired_velocity;

    // Horizontal pass
    let vx = body.velocity.x;
    if vx != 0.0 {
        body.translate_x(vx);
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.is_solid() || !body.rect().overlaps(&obstacle.bounds) {
                continue;
            }
            let mut rect = body.rect();
            if vx > 0.0 {
                rect.set_right(obstacle.bounds.left());
            } else {
                rect.set_left(obstacle.bounds.right());
            }
            body.resync_x(rect);
            report.touches.push(Touch {
                obstacle: index,
                axis: Axis::Horizontal,
            });
        }
    }

    // Vertical pass
    body.grounded = false;
    let vy = body.velocity.y;
    if vy != 0.0 {
        body.translate_y(vy);
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.is_solid() || !body.rect().overlaps(&obstacle.bounds) {
                continue;
            }
            let mut rect = body.rect();
            if vy > 0.0 {
                rect.set_bottom(obstacle.bounds.top());
                body.grounded = true;
                report.landed = true;
            } else {
                rect.set_top(obstacle.bounds.bottom());
                report.bumped_head = true;
            }
            body.velocity.y = 0.0;
            body.resync_y(rect);
            report.touches.push(Touch {
                obstacle: index,
                axis: Axis::Vertical,
            });
        }
    }

    if let Some(bounds) = bounds {
        let mut rect = body.rect();
        if rect.left() < 0 {
            rect.set_left(0);
            body.resync_x(rect);
        }
        if rect.right() > bounds.width {
            rect.set_right(bounds.width);
            body.resync_x(rect);
        }
        if body.rect().bottom() > bounds.height {
            body.respawn();
            report.respawned = true;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use glam::IVec2;
    use proptest::prelude::*;

    const BODY: IVec2 = IVec2::new(25, 40);

    fn body_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y), BODY)
    }

    fn floor() -> Obstacle {
        Obstacle::wall(Rect::new(0, 560, 300, 40))
    }

    #[test]
    fn test_landing_on_floor_at_terminal_velocity() {
        let mut body = body_at(100.0, 510.0);
        let report = resolve(&mut body, &[floor()], Vec2::new(0.0, 15.0), None);

        assert_eq!(body.position().y, 520.0);
        assert_eq!(body.rect().bottom(), 560);
        assert!(body.grounded);
        assert_eq!(body.velocity.y, 0.0);
        assert!(report.landed);
        assert_eq!(
            report.touches,
            vec![Touch {
                obstacle: 0,
                axis: Axis::Vertical
            }]
        );
    }

    #[test]
    fn test_free_fall_above_floor_does_not_collide() {
        let mut body = body_at(100.0, 490.0);
        let report = resolve(&mut body, &[floor()], Vec2::new(0.0, 15.0), None);
        assert_eq!(body.position().y, 505.0);
        assert!(!body.grounded);
        assert_eq!(body.velocity.y, 15.0);
        assert!(report.touches.is_empty());
    }

    #[test]
    fn test_horizontal_clamp_both_directions() {
        let wall = [Obstacle::wall(Rect::new(200, 0, 40, 600))];

        let mut body = body_at(172.0, 100.0);
        resolve(&mut body, &wall, Vec2::new(5.0, 0.0), None);
        assert_eq!(body.rect().right(), 200);
        assert_eq!(body.position().x, 175.0);

        let mut body = body_at(243.0, 100.0);
        let report = resolve(&mut body, &wall, Vec2::new(-5.0, 0.0), None);
        assert_eq!(body.rect().left(), 240);
        assert_eq!(
            report.touches,
            vec![Touch {
                obstacle: 0,
                axis: Axis::Horizontal
            }]
        );
    }

    #[test]
    fn test_ceiling_bump_stops_upward_motion() {
        let ceiling = [Obstacle::wall(Rect::new(0, 0, 800, 20))];
        let mut body = body_at(50.0, 30.0);
        let report = resolve(&mut body, &ceiling, Vec2::new(0.0, -15.0), None);
        assert_eq!(body.rect().top(), 20);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.grounded);
        assert!(report.bumped_head);
    }

    #[test]
    fn test_no_obstacles_moves_freely() {
        let mut body = body_at(10.5, 10.25);
        let report = resolve(&mut body, &[], Vec2::new(3.0, -2.5), None);
        assert_eq!(body.position(), Vec2::new(13.5, 7.75));
        assert_eq!(body.rect().x, 13);
        assert_eq!(body.rect().y, 7);
        assert_eq!(report, ResolutionReport::default());
    }

    #[test]
    fn test_zero_velocity_skips_resting_contact() {
        // Flush against a wall on the right and standing on a floor
        let obstacles = [
            Obstacle::wall(Rect::new(125, 0, 40, 600)),
            Obstacle::wall(Rect::new(0, 440, 800, 40)),
        ];
        let mut body = body_at(100.0, 400.0);
        let report = resolve(&mut body, &obstacles, Vec2::ZERO, None);
        assert!(report.touches.is_empty());
        assert_eq!(body.position(), Vec2::new(100.0, 400.0));
    }

    #[test]
    fn test_zero_velocity_is_idempotent() {
        let obstacles = [floor(), Obstacle::wall(Rect::new(300, 0, 20, 560))];
        let mut body = body_at(37.25, 120.5);
        resolve(&mut body, &obstacles, Vec2::ZERO, None);
        let first = body.position();
        resolve(&mut body, &obstacles, Vec2::ZERO, None);
        assert_eq!(body.position(), first);
        assert_eq!(first, Vec2::new(37.25, 120.5));
    }

    #[test]
    fn test_grounded_clears_when_airborne() {
        let obstacles = [floor()];
        let mut body = body_at(100.0, 510.0);
        resolve(&mut body, &obstacles, Vec2::new(0.0, 15.0), None);
        assert!(body.grounded);

        // Jump: moving up, nothing overhead
        resolve(&mut body, &obstacles, Vec2::new(0.0, -15.0), None);
        assert!(!body.grounded);

        // Standing still also re-evaluates to airborne
        let mut body = body_at(100.0, 510.0);
        resolve(&mut body, &obstacles, Vec2::new(0.0, 15.0), None);
        resolve(&mut body, &obstacles, Vec2::ZERO, None);
        assert!(!body.grounded);
    }

    #[test]
    fn test_resting_body_pressing_down_stays_grounded() {
        let obstacles = [floor()];
        let mut body = body_at(100.0, 520.0);
        for _ in 0..5 {
            resolve(&mut body, &obstacles, Vec2::new(0.0, 1.0), None);
            assert!(body.grounded);
            assert_eq!(body.rect().bottom(), 560);
        }
    }

    #[test]
    fn test_fall_below_world_respawns() {
        let bounds = WorldBounds {
            width: 800,
            height: 600,
        };
        let mut body = KinematicBody::new(Vec2::new(100.0, 400.0), BODY);
        body.set_position(Vec2::new(400.0, 550.0));
        let report = resolve(&mut body, &[], Vec2::new(0.0, 15.0), Some(bounds));
        assert!(report.respawned);
        assert_eq!(body.position(), Vec2::new(100.0, 400.0));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_horizontal_world_clamp_resyncs_position() {
        let bounds = WorldBounds {
            width: 800,
            height: 600,
        };
        let mut body = body_at(2.5, 100.0);
        resolve(&mut body, &[], Vec2::new(-5.0, 0.0), Some(bounds));
        assert_eq!(body.position().x, 0.0);

        let mut body = body_at(773.0, 100.0);
        resolve(&mut body, &[], Vec2::new(5.0, 0.0), Some(bounds));
        assert_eq!(body.rect().right(), 800);
        assert_eq!(body.position().x, 775.0);
    }

    #[test]
    fn test_echo_platform_solidity_is_read_each_call() {
        let mut obstacles = [Obstacle::echo(Rect::new(320, 450, 160, 20))];
        obstacles[0].activate();

        let mut body = body_at(350.0, 400.0);
        resolve(&mut body, &obstacles, Vec2::new(0.0, 15.0), None);
        assert!(body.grounded);
        assert_eq!(body.rect().bottom(), 450);

        obstacles[0].activate();
        let report = resolve(&mut body, &obstacles, Vec2::new(0.0, 15.0), None);
        assert!(!body.grounded);
        assert!(report.touches.is_empty());
        assert!(body.rect().overlaps(&obstacles[0].bounds));
    }

    #[test]
    fn test_non_solid_obstacle_never_reported() {
        let obstacles = [Obstacle::echo(Rect::new(0, 0, 100, 100))];
        let mut body = body_at(10.0, 10.0);
        let report = resolve(&mut body, &obstacles, Vec2::new(3.0, 3.0), None);
        assert!(report.touches.is_empty());
        assert_eq!(body.position(), Vec2::new(13.0, 13.0));
    }

    #[test]
    fn test_simultaneous_overlaps_resolve_in_list_order() {
        // Two stacked floor pieces both overlapped by a fast fall
        let obstacles = [
            Obstacle::wall(Rect::new(0, 100, 100, 10)),
            Obstacle::wall(Rect::new(0, 95, 100, 10)),
        ];
        let mut body = body_at(10.0, 50.0);
        let report = resolve(&mut body, &obstacles, Vec2::new(0.0, 20.0), None);
        // The first clamps to y=100, the second still overlaps and clamps to 95
        assert_eq!(body.rect().bottom(), 95);
        assert_eq!(report.touches.len(), 2);
        assert_eq!(report.touches[0].obstacle, 0);
        assert_eq!(report.touches[1].obstacle, 1);
        assert!(body.grounded);
    }

    #[test]
    fn test_diagonal_into_corner_does_not_tunnel() {
        // L-shaped corner: wall on the right, floor below
        let obstacles = [
            Obstacle::wall(Rect::new(100, 0, 40, 200)),
            Obstacle::wall(Rect::new(0, 200, 140, 40)),
        ];
        let mut body = body_at(70.0, 155.0);
        for _ in 0..10 {
            resolve(&mut body, &obstacles, Vec2::new(3.0, 3.0), None);
            for obstacle in &obstacles {
                assert!(!body.rect().overlaps(&obstacle.bounds));
            }
        }
        assert_eq!(body.rect().right(), 100);
        assert_eq!(body.rect().bottom(), 200);
    }

    proptest! {
        #[test]
        fn prop_single_obstacle_never_left_overlapping(
            ox in -200i32..200,
            oy in -200i32..200,
            ow in 10i32..120,
            oh in 10i32..120,
            bx in -300.0f32..300.0,
            by in -300.0f32..300.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let obstacle = Obstacle::wall(Rect::new(ox, oy, ow, oh));
            let mut body = body_at(bx, by);
            prop_assume!(!body.rect().overlaps(&obstacle.bounds));

            resolve(&mut body, std::slice::from_ref(&obstacle), Vec2::new(vx, vy), None);

            prop_assert!(!body.rect().overlaps(&obstacle.bounds));
            prop_assert_eq!(body.rect().x, body.position().x.floor() as i32);
            prop_assert_eq!(body.rect().y, body.position().y.floor() as i32);
        }

        #[test]
        fn prop_several_walls_never_left_overlapping(
            walls in proptest::collection::vec(
                (-200i32..200, -200i32..200, 10i32..120, 10i32..120),
                1..=4,
            ),
            bx in -300.0f32..300.0,
            by in -300.0f32..300.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let mut body = body_at(bx, by);
            // Walls the body already starts inside are left out of the level
            let obstacles: Vec<Obstacle> = walls
                .into_iter()
                .map(|(x, y, w, h)| Obstacle::wall(Rect::new(x, y, w, h)))
                .filter(|o| !o.bounds.overlaps(&body.rect()))
                .collect();
            prop_assume!(!obstacles.is_empty());

            let report = resolve(&mut body, &obstacles, Vec2::new(vx, vy), None);

            for obstacle in &obstacles {
                prop_assert!(!body.rect().overlaps(&obstacle.bounds));
            }
            prop_assert!(report.touches.iter().all(|t| t.obstacle < obstacles.len()));
            prop_assert_eq!(body.rect().x, body.position().x.floor() as i32);
            prop_assert_eq!(body.rect().y, body.position().y.floor() as i32);
        }
    }
}
