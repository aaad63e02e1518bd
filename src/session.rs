//! The session - owns the world, the observer, and what the observer has seen.
//!
//! Everything mutable lives here and is reached through `&mut self`, so a
//! single owner drives the whole thing one call at a time. The host calls
//! [`Session::tick`] once per frame and renders from the accessors.

use std::collections::HashSet;

use tracing::info;

use crate::chunk::ChunkCoord;
use crate::config::SessionConfig;
use crate::constants::{CHUNK_SIZE, SAVE_FORMAT_VERSION};
use crate::error::SaveError;
use crate::fov::FOV;
use crate::rng::Seed;
use crate::save::{in_world, SaveState};
use crate::tile::Tile;
use crate::world::World;

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Blocked,
}

pub struct Session {
    world: World,

    /// Observer position in world tiles
    position: (i32, i32),

    /// Every tile ever marked visible
    seen: HashSet<(i32, i32)>,

    /// Tiles visible as of the last visibility update
    visible: HashSet<(i32, i32)>,

    fog_of_war: bool,

    config: SessionConfig,

    /// Whether visibility needs recalculation
    fov_dirty: bool,
}

impl Session {
    /// Start a fresh world. The observer is placed on the walkable tile
    /// nearest the centre of chunk (0, 0).
    pub fn new(seed: Seed, config: SessionConfig) -> Self {
        let mut world = World::new(seed);
        let position = find_spawn(&mut world);
        world.ensure_area(position, config.view_radius + 1);
        info!(seed = %world.seed(), ?position, "new session");

        Self {
            world,
            position,
            seen: HashSet::new(),
            visible: HashSet::new(),
            fog_of_war: config.fog_of_war,
            config,
            fov_dirty: true,
        }
    }

    /// Rebuild a session from a persisted record.
    ///
    /// The world is regenerated from the seed and the chunks around the
    /// restored position are generated immediately. Seen entries outside the
    /// world are dropped.
    pub fn restore(state: SaveState, config: SessionConfig) -> Result<Self, SaveError> {
        state.validate()?;

        let mut world = World::new(state.seed);
        let position = (state.x, state.y);
        world.ensure_area(position, config.view_radius + 1);
        let seen: HashSet<(i32, i32)> = state
            .seen
            .into_iter()
            .filter(|&(x, y)| in_world(x, y))
            .collect();
        info!(seed = %world.seed(), ?position, seen = seen.len(), "restored session");

        Ok(Self {
            world,
            position,
            seen,
            visible: HashSet::new(),
            fog_of_war: state.fog_of_war,
            config,
            fov_dirty: true,
        })
    }

    pub fn restore_json(text: &str, config: SessionConfig) -> Result<Self, SaveError> {
        Self::restore(SaveState::from_json(text)?, config)
    }

    /// Snapshot for persistence. When more tiles have been seen than the
    /// cap allows, the ones nearest the observer are kept.
    pub fn export_state(&self) -> SaveState {
        let (px, py) = self.position;
        let mut seen: Vec<(i32, i32)> = self.seen.iter().copied().collect();
        seen.sort_by_key(|&(x, y)| {
            let dx = x as i64 - px as i64;
            let dy = y as i64 - py as i64;
            ((dx * dx).saturating_add(dy * dy), y, x)
        });
        seen.truncate(self.config.seen_export_cap);

        SaveState {
            version: SAVE_FORMAT_VERSION,
            seed: self.world.seed().clone(),
            x: px,
            y: py,
            fog_of_war: self.fog_of_war,
            seen,
        }
    }

    /// Step the observer. The destination chunk is generated if needed and
    /// the move only happens onto a passable tile inside the world.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> MoveResult {
        let dest = match (
            self.position.0.checked_add(dx),
            self.position.1.checked_add(dy),
        ) {
            (Some(x), Some(y)) if in_world(x, y) => (x, y),
            _ => return MoveResult::Blocked,
        };
        if !self.world.is_passable(dest.0, dest.1) {
            return MoveResult::Blocked;
        }
        self.position = dest;
        self.fov_dirty = true;
        MoveResult::Moved
    }

    /// Per-frame update. Recomputes visibility when something changed since
    /// the last tick; returns whether it did.
    ///
    /// Every mutation of position, fog mode or terrain goes through the
    /// session and marks visibility dirty, so a skipped recompute always
    /// matches what a full one would produce.
    pub fn tick(&mut self) -> bool {
        if !self.fov_dirty {
            return false;
        }
        self.update_visibility();
        true
    }

    /// Recompute the visible set and fold it into the seen set.
    pub fn update_visibility(&mut self) {
        puffin::profile_function!();
        self.visible = FOV::calculate(
            &mut self.world,
            self.position,
            self.config.view_radius,
            self.fog_of_war,
        );
        self.seen.extend(self.visible.iter().copied());
        self.fov_dirty = false;
    }

    pub fn toggle_fog(&mut self) -> bool {
        self.set_fog_of_war(!self.fog_of_war);
        self.fog_of_war
    }

    pub fn set_fog_of_war(&mut self, enabled: bool) {
        if self.fog_of_war != enabled {
            self.fog_of_war = enabled;
            self.fov_dirty = true;
        }
    }

    /// Edit terrain. The only write path into the world, so visibility is
    /// refreshed on the next tick.
    pub fn set_tile(&mut self, world_x: i32, world_y: i32, tile: Tile) {
        self.world.set_tile(world_x, world_y, tile);
        self.fov_dirty = true;
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn seen(&self) -> &HashSet<(i32, i32)> {
        &self.seen
    }

    pub fn visible(&self) -> &HashSet<(i32, i32)> {
        &self.visible
    }

    pub fn fog_of_war(&self) -> bool {
        self.fog_of_war
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Passability at a world tile, generating its chunk if needed.
    pub fn is_passable(&mut self, world_x: i32, world_y: i32) -> bool {
        self.world.is_passable(world_x, world_y)
    }
}

/// Passable tile nearest the centre of chunk (0, 0), searched ring by ring.
fn find_spawn(world: &mut World) -> (i32, i32) {
    let (ox, oy) = ChunkCoord::new(0, 0).origin();
    let center = (ox + CHUNK_SIZE / 2, oy + CHUNK_SIZE / 2);

    for r in 0..CHUNK_SIZE {
        let mut best: Option<(i32, (i32, i32))> = None;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx.abs().max(dy.abs()) != r {
                    continue;
                }
                let pos = (center.0 + dx, center.1 + dy);
                if !world.is_passable(pos.0, pos.1) {
                    continue;
                }
                let dist = dx * dx + dy * dy;
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, pos));
                }
            }
        }
        if let Some((_, pos)) = best {
            return pos;
        }
    }
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: &str) -> Session {
        Session::new(Seed::new(seed), SessionConfig::default())
    }

    #[test]
    fn test_spawn_is_passable() {
        for seed in ["ABCDEFGH", "spawn-a", "spawn-b", "QWERTYUI"] {
            let mut s = session(seed);
            let (x, y) = s.position();
            assert!(s.is_passable(x, y), "seed {seed}");
        }
    }

    #[test]
    fn test_first_tick_computes_visibility() {
        let mut s = session("ABCDEFGH");
        assert!(s.visible().is_empty());
        assert!(s.tick());
        assert!(s.visible().contains(&s.position()));
        assert!(!s.tick());
    }

    #[test]
    fn test_seen_accumulates() {
        let mut s = session("ABCDEFGH");
        s.tick();
        let before: HashSet<_> = s.seen().clone();
        for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1), (1, 0), (1, 0)] {
            s.attempt_move(dx, dy);
            s.tick();
            assert!(s.seen().is_superset(&before));
            assert!(s.seen().is_superset(s.visible()));
        }
    }

    #[test]
    fn test_move_into_wall_is_blocked() {
        let mut s = session("ABCDEFGH");
        let (x, y) = s.position();
        s.set_tile(x + 1, y, Tile::Wall);
        assert_eq!(s.attempt_move(1, 0), MoveResult::Blocked);
        assert_eq!(s.position(), (x, y));

        s.set_tile(x + 1, y, Tile::Floor);
        assert_eq!(s.attempt_move(1, 0), MoveResult::Moved);
        assert_eq!(s.position(), (x + 1, y));
    }

    #[test]
    fn test_new_wall_hides_tile_after_tick() {
        let mut s = session("ABCDEFGH");
        let (x, y) = s.position();
        s.set_tile(x + 1, y, Tile::Floor);
        s.set_tile(x + 2, y, Tile::Floor);
        assert!(s.tick());
        assert!(s.visible().contains(&(x + 2, y)));

        s.set_tile(x + 1, y, Tile::Wall);
        assert!(s.tick());
        assert!(s.visible().contains(&(x + 1, y)));
        assert!(!s.visible().contains(&(x + 2, y)));
    }

    #[test]
    fn test_move_cannot_leave_world() {
        let mut s = session("ABCDEFGH");
        let start = s.position();
        assert_eq!(s.attempt_move(i32::MAX, 0), MoveResult::Blocked);
        assert_eq!(s.attempt_move(0, i32::MIN), MoveResult::Blocked);
        assert_eq!(s.position(), start);
    }

    #[test]
    fn test_export_handles_far_seen_entries() {
        let mut s = session("ABCDEFGH");
        s.tick();
        s.seen.insert((i32::MIN, 0));
        s.seen.insert((i32::MAX, i32::MAX));
        let state = s.export_state();
        assert_eq!(state.seen[0], s.position());
        assert_eq!(state.seen.last(), Some(&(i32::MAX, i32::MAX)));
    }

    #[test]
    fn test_toggle_fog_marks_dirty() {
        let mut s = session("ABCDEFGH");
        s.tick();
        let fogged = s.visible().len();
        assert!(!s.toggle_fog());
        assert!(s.tick());
        assert!(s.visible().len() >= fogged);
        let radius = s.config().view_radius;
        let disc = (-radius..=radius)
            .flat_map(|dy| (-radius..=radius).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| dx * dx + dy * dy <= radius * radius)
            .count();
        assert_eq!(s.visible().len(), disc);
    }

    #[test]
    fn test_export_caps_nearest_first() {
        let config = SessionConfig {
            seen_export_cap: 5,
            ..SessionConfig::default()
        };
        let mut s = Session::new(Seed::new("ABCDEFGH"), config);
        s.tick();
        let state = s.export_state();
        assert_eq!(state.seen.len(), 5);
        assert_eq!(state.seen[0], s.position());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut s = session("ABCDEFGH");
        s.tick();
        s.toggle_fog();
        let state = s.export_state();

        let restored = Session::restore(state.clone(), SessionConfig::default()).unwrap();
        assert_eq!(restored.position(), s.position());
        assert_eq!(restored.fog_of_war(), s.fog_of_war());
        assert_eq!(restored.world().seed(), s.world().seed());
        for p in &state.seen {
            assert!(restored.seen().contains(p));
        }
        let (x, y) = restored.position();
        assert!(restored.world().is_generated(ChunkCoord::from_world(x, y)));
    }

    #[test]
    fn test_restore_rejects_bad_version() {
        let mut state = session("ABCDEFGH").export_state();
        state.version = 99;
        assert!(Session::restore(state, SessionConfig::default()).is_err());
        assert!(Session::restore_json("{oops", SessionConfig::default()).is_err());
    }
}
