//! Path following, plus the flat-world geometry helpers the AI shares.

use crate::components::Position;

use super::context::{AiContext, MoveRequest};

/// Waypoints closer than this (XZ) count as reached.
pub const WAYPOINT_REACHED: f32 = 0.5;

/// Compute the yaw angle (0..360 degrees) from one position facing another.
///
/// Convention: 0 = south (+Z), 90 = west (-X), 180 = north (-Z), 270 = east (+X).
pub fn yaw_toward(from: &Position, to: &Position) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    let yaw = (-dx).atan2(dz).to_degrees();
    ((yaw % 360.0) + 360.0) % 360.0
}

/// Pitch (degrees, positive = down) from `from` looking at `to`.
pub fn pitch_toward(from: &Position, to: &Position) -> f32 {
    let dy = to.y - from.y;
    let horizontal = from.distance_xz(to);
    -dy.atan2(horizontal).to_degrees()
}

/// Wrap an angle into (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    }
    if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Turn `current` toward `target` by at most `max_step` degrees.
pub fn approach_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_degrees(target - current).clamp(-max_step, max_step);
    current + delta
}

/// Direct path for an obstacle-free world: a single waypoint, or nothing when
/// the goal lies beyond `max_distance`.
pub fn find_path(start: &Position, goal: &Position, max_distance: f32) -> Vec<Position> {
    if start.distance_xz(goal) > max_distance {
        return Vec::new();
    }
    vec![*goal]
}

/// Turns path requests into per-tick move requests.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    fn update(&mut self, ctx: &mut AiContext);

    fn has_path(&self) -> bool;

    fn clear(&mut self);
}

/// Walks a path on the ground, one waypoint at a time.
#[derive(Debug, Default)]
pub struct GroundNavigator {
    path: Vec<Position>,
    next: usize,
    speed: f32,
}

impl GroundNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The waypoint currently walked toward.
    pub fn current_waypoint(&self) -> Option<Position> {
        self.path.get(self.next).copied()
    }
}

impl Navigator for GroundNavigator {
    fn update(&mut self, ctx: &mut AiContext) {
        if std::mem::take(&mut ctx.requests.stop_navigation) {
            self.clear();
        }
        if let Some(request) = ctx.requests.path_to.take() {
            self.path = find_path(&ctx.position, &request.target, ctx.follow_range);
            self.next = 0;
            self.speed = request.speed;
        }

        while let Some(waypoint) = self.current_waypoint() {
            if ctx.position.distance_xz(&waypoint) >= WAYPOINT_REACHED {
                break;
            }
            self.next += 1;
        }

        match self.current_waypoint() {
            Some(target) => {
                ctx.requests.move_to = Some(MoveRequest {
                    target,
                    speed: self.speed,
                });
            }
            None => self.clear(),
        }
    }

    fn has_path(&self) -> bool {
        self.next < self.path.len()
    }

    fn clear(&mut self) {
        self.path.clear();
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AiFixture;

    fn at(x: f32, z: f32) -> Position {
        Position::new(x, 4.0, z)
    }

    #[test]
    fn yaw_cardinal_directions() {
        let origin = at(0.0, 0.0);
        let south = yaw_toward(&origin, &at(0.0, 10.0));
        assert!(south.abs() < 0.1 || (south - 360.0).abs() < 0.1);
        assert!((yaw_toward(&origin, &at(-10.0, 0.0)) - 90.0).abs() < 0.1);
        assert!((yaw_toward(&origin, &at(0.0, -10.0)) - 180.0).abs() < 0.1);
        assert!((yaw_toward(&origin, &at(10.0, 0.0)) - 270.0).abs() < 0.1);
    }

    #[test]
    fn pitch_down_is_positive() {
        let eye = Position::new(0.0, 10.0, 0.0);
        let below = Position::new(5.0, 5.0, 0.0);
        assert!((pitch_toward(&eye, &below) - 45.0).abs() < 0.1);
    }

    #[test]
    fn approach_takes_short_way_round() {
        assert!((approach_angle(350.0, 10.0, 30.0) - 370.0).abs() < 0.01);
        assert!((approach_angle(0.0, 90.0, 30.0) - 30.0).abs() < 0.01);
        assert!((approach_angle(0.0, -5.0, 30.0) + 5.0).abs() < 0.01);
    }

    #[test]
    fn find_path_direct_or_nothing() {
        let path = find_path(&at(0.0, 0.0), &at(10.0, 10.0), 50.0);
        assert_eq!(path, vec![at(10.0, 10.0)]);
        assert!(find_path(&at(0.0, 0.0), &at(100.0, 0.0), 16.0).is_empty());
    }

    #[test]
    fn follows_path_until_reached() {
        let mut fx = AiFixture::new();
        let mut nav = GroundNavigator::new();
        fx.requests.path_to = Some(MoveRequest {
            target: at(5.5, 0.5),
            speed: 1.0,
        });
        nav.update(&mut fx.ctx());
        assert!(nav.has_path());
        assert_eq!(fx.requests.move_to.map(|m| m.target), Some(at(5.5, 0.5)));

        fx.requests.move_to = None;
        fx.position = at(5.3, 0.5);
        nav.update(&mut fx.ctx());
        assert!(!nav.has_path());
        assert!(fx.requests.move_to.is_none());
    }

    #[test]
    fn stop_request_clears_path() {
        let mut fx = AiFixture::new();
        let mut nav = GroundNavigator::new();
        fx.requests.path_to = Some(MoveRequest {
            target: at(5.5, 0.5),
            speed: 1.0,
        });
        nav.update(&mut fx.ctx());
        fx.requests.move_to = None;
        fx.requests.stop_navigation = true;
        nav.update(&mut fx.ctx());
        assert!(!nav.has_path());
        assert!(fx.requests.move_to.is_none());
    }

    #[test]
    fn goal_beyond_follow_range_is_ignored() {
        let mut fx = AiFixture::new();
        let mut nav = GroundNavigator::new();
        fx.requests.path_to = Some(MoveRequest {
            target: at(500.0, 0.5),
            speed: 1.0,
        });
        nav.update(&mut fx.ctx());
        assert!(!nav.has_path());
    }
}
