//! Per-tick simulation step
//!
//! Each tick runs three phases strictly in order:
//!
//! 1. Spawn: when the spawn timer has fired, request a batch of new
//!    snowflakes from the pool.
//! 2. Advance: every live snowflake moves down by its velocity.
//! 3. Landing: a snowflake at or below the surface of its column is added
//!    to the terrain and its slot released.
//!
//! Advance and landing share a single pass over the pool. Particles never
//! interact with each other directly, only through the terrain.

use crate::config::{Geometry, SetupError, SnowfieldConfig, MAX_SNOWFLAKES};
use crate::traits::RandomSource;

use super::pool::SnowflakePool;
use super::snowflake::{SlotId, Snowflake};
use super::terrain::Terrain;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Snowflakes created this tick
    pub spawned: u8,
    /// Snowflakes that landed this tick
    pub landed: u16,
    /// Live snowflakes after the tick
    pub active: u16,
}

/// Simulation state for one display
#[derive(Debug, Clone)]
pub struct SnowField<const N: usize = MAX_SNOWFLAKES> {
    pool: SnowflakePool<N>,
    terrain: Terrain,
    geometry: Geometry,
    config: SnowfieldConfig,
    /// Time at which the next batch spawns
    next_spawn_ms: u64,
}

impl<const N: usize> SnowField<N> {
    /// Create a field with an empty pool and flat terrain
    ///
    /// The first batch spawns one spawn delay after `now_ms`.
    pub fn new(geometry: Geometry, config: SnowfieldConfig, now_ms: u64) -> Result<Self, SetupError> {
        config.validate(&geometry)?;
        let terrain = Terrain::new(geometry, config.default_snow_level)?;

        let mut pool = SnowflakePool::new();
        pool.reset_all();

        Ok(Self {
            pool,
            terrain,
            geometry,
            config,
            next_spawn_ms: now_ms.saturating_add(config.new_snowflakes_delay_ms),
        })
    }

    /// Run one tick
    pub fn step<R: RandomSource + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();

        if now_ms >= self.next_spawn_ms {
            report.spawned = self.spawn_batch(rng);
            self.next_spawn_ms = now_ms.saturating_add(self.config.new_snowflakes_delay_ms);
        }

        report.landed = self.advance();
        report.active = self.pool.active_count() as u16;
        report
    }

    /// Request one batch of snowflakes, returning how many were created
    fn spawn_batch<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> u8 {
        let mut spawned = 0;
        for _ in 0..self.config.new_snowflakes_count {
            if self.pool.find_free().is_none() {
                break;
            }
            let flake = Snowflake {
                x: rng.range_inclusive(0, self.geometry.last_column()),
                y: rng.range_inclusive(self.config.spawn_row_min, self.config.spawn_row_max),
                dx: 0,
                dy: 1,
                active: true,
            };
            if self.pool.allocate(flake).is_some() {
                spawned += 1;
            }
        }
        spawned
    }

    /// Move every live snowflake and settle the ones that landed
    fn advance(&mut self) -> u16 {
        let mut landed = 0;

        for i in 0..self.pool.capacity() {
            let id = SlotId(i as u16);
            let Some(flake) = self.pool.get_mut(id) else {
                continue;
            };
            if !flake.active {
                continue;
            }

            flake.y = flake.y.saturating_add(flake.dy as i16);
            let moved = *flake;

            if self.has_landed(&moved) {
                self.terrain.on_landing(moved.x as usize);
                self.pool.release(id);
                landed += 1;
            }
        }

        landed
    }

    /// Whether `flake` has reached the surface of its column
    pub fn has_landed(&self, flake: &Snowflake) -> bool {
        flake.y >= self.terrain.surface_row(flake.x as usize)
    }

    /// Particle pool
    pub fn pool(&self) -> &SnowflakePool<N> {
        &self.pool
    }

    /// Terrain heightmap
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Display geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Animation parameters
    pub fn config(&self) -> &SnowfieldConfig {
        &self.config
    }

    /// Time at which the next batch spawns
    pub fn next_spawn_ms(&self) -> u64 {
        self.next_spawn_ms
    }

    #[cfg(test)]
    pub(crate) fn pool_mut(&mut self) -> &mut SnowflakePool<N> {
        &mut self.pool
    }

    #[cfg(test)]
    pub(crate) fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Replays a fixed sequence of values, clamped to the requested range
    struct ScriptedRandom {
        values: &'static [i16],
        next: usize,
    }

    impl ScriptedRandom {
        fn new(values: &'static [i16]) -> Self {
            Self { values, next: 0 }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn range_inclusive(&mut self, min: i16, max: i16) -> i16 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v.clamp(min, max)
        }
    }

    fn field(width: u16, height: u16) -> SnowField {
        SnowField::new(
            Geometry::new(width, height).unwrap(),
            SnowfieldConfig::default(),
            0,
        )
        .unwrap()
    }

    fn place(field: &mut SnowField, x: i16, y: i16) -> SlotId {
        field
            .pool_mut()
            .allocate(Snowflake {
                x,
                y,
                dx: 0,
                dy: 1,
                active: true,
            })
            .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_snow_level() {
        let config = SnowfieldConfig {
            default_snow_level: 20,
            ..SnowfieldConfig::default()
        };
        let result = SnowField::<MAX_SNOWFLAKES>::new(Geometry::new(8, 20).unwrap(), config, 0);
        assert_eq!(
            result.err(),
            Some(SetupError::SnowLevelOutOfRange { level: 20, max: 19 })
        );
    }

    #[test]
    fn test_no_spawn_before_timer() {
        let mut field = field(8, 20);
        let mut rng = SmallRng::seed_from_u64(1);
        let report = field.step(249, &mut rng);
        assert_eq!(report.spawned, 0);
        assert_eq!(field.pool().active_count(), 0);
    }

    #[test]
    fn test_spawn_batch_when_timer_fires() {
        let mut field = field(8, 20);
        let mut rng = ScriptedRandom::new(&[4, -3]);
        let report = field.step(250, &mut rng);
        assert_eq!(report.spawned, 3);
        assert_eq!(report.active, 3);
        assert_eq!(field.next_spawn_ms(), 500);

        // Spawned at row -3 and already advanced once
        for flake in field.pool().iter_active() {
            assert_eq!(flake.x, 4);
            assert_eq!(flake.y, -2);
            assert_eq!(flake.dy, 1);
            assert_eq!(flake.dx, 0);
        }
    }

    #[test]
    fn test_spawn_timer_restarts_from_now() {
        let mut field = field(8, 20);
        let mut rng = SmallRng::seed_from_u64(3);
        field.step(400, &mut rng);
        assert_eq!(field.next_spawn_ms(), 650);
        assert_eq!(field.step(649, &mut rng).spawned, 0);
        assert_eq!(field.step(650, &mut rng).spawned, 3);
    }

    #[test]
    fn test_spawn_into_exhausted_pool() {
        let mut field: SnowField<4> = SnowField::new(
            Geometry::new(8, 64).unwrap(),
            SnowfieldConfig::default(),
            0,
        )
        .unwrap();
        let mut rng = ScriptedRandom::new(&[0, -3]);

        assert_eq!(field.step(250, &mut rng).spawned, 3);
        let report = field.step(500, &mut rng);
        assert_eq!(report.spawned, 1);
        assert_eq!(report.active, 4);
        // Timer still advances when nothing could spawn
        assert_eq!(field.step(750, &mut rng).spawned, 0);
        assert_eq!(field.next_spawn_ms(), 1000);
    }

    #[test]
    fn test_landing_after_exact_tick_count() {
        let mut field = field(8, 20);
        let mut rng = SmallRng::seed_from_u64(5);
        // Surface row of a flat field is 20 - 1 - 10 = 9
        let id = place(&mut field, 3, -2);
        let ticks = field.terrain().surface_row(3) - (-2);
        assert_eq!(ticks, 11);

        for _ in 0..ticks - 1 {
            field.step(0, &mut rng);
            assert!(field.pool().get(id).unwrap().active);
        }

        let report = field.step(0, &mut rng);
        assert_eq!(report.landed, 1);
        assert!(!field.pool().get(id).unwrap().active);
        assert_eq!(field.terrain().height(3), Some(11));

        // Stays inactive and is not settled again
        field.step(0, &mut rng);
        assert_eq!(field.terrain().height(3), Some(11));
        assert_eq!(field.pool().active_count(), 0);
    }

    #[test]
    fn test_landing_feeds_redistribution() {
        let mut field = field(5, 20);
        let mut rng = SmallRng::seed_from_u64(9);
        *field.terrain_mut() = Terrain::with_heights(
            Geometry::new(5, 20).unwrap(),
            10,
            &[10, 10, 12, 10, 10],
        );
        // Surface of column 2 is row 7
        place(&mut field, 2, 6);
        let report = field.step(0, &mut rng);
        assert_eq!(report.landed, 1);
        assert_eq!(field.terrain().heights(), &[10, 11, 13, 11, 10]);
    }

    #[test]
    fn test_has_landed() {
        let field = field(8, 20);
        let mut flake = Snowflake {
            x: 0,
            y: 8,
            dx: 0,
            dy: 1,
            active: true,
        };
        assert!(!field.has_landed(&flake));
        flake.y = 9;
        assert!(field.has_landed(&flake));
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut a = field(16, 32);
        let mut b = field(16, 32);
        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);

        for tick in 0..600u64 {
            let now = tick * 33;
            assert_eq!(a.step(now, &mut rng_a), b.step(now, &mut rng_b));
        }

        assert_eq!(a.terrain().heights(), b.terrain().heights());
        assert!(a.pool().iter_active().eq(b.pool().iter_active()));
    }

    #[test]
    fn test_end_to_end_small_field() {
        let mut field = field(8, 20);
        let mut rng = SmallRng::seed_from_u64(2024);

        for tick in 0..1000u64 {
            field.step(tick * 33, &mut rng);
            assert!(field.pool().active_count() <= MAX_SNOWFLAKES);
            for &h in field.terrain().heights() {
                assert!((10..=19).contains(&h));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_field_stays_in_bounds(
            seed in any::<u64>(),
            width in 1u16..48,
            height in 11u16..64,
            ticks in 1usize..400,
            frame_ms in 1u64..300,
        ) {
            let mut field = field(width, height);
            let mut rng = SmallRng::seed_from_u64(seed);

            let config = *field.config();
            let slot_active = |field: &SnowField, i: usize| {
                field.pool().get(SlotId(i as u16)).is_some_and(|f| f.active)
            };

            for tick in 0..ticks {
                let was_active: Vec<bool> =
                    (0..MAX_SNOWFLAKES).map(|i| slot_active(&field, i)).collect();
                let report = field.step(tick as u64 * frame_ms, &mut rng);

                // New flakes start in the spawn rows and have moved once
                for (i, &was) in was_active.iter().enumerate() {
                    if was || !slot_active(&field, i) {
                        continue;
                    }
                    let flake = field.pool().get(SlotId(i as u16)).unwrap();
                    prop_assert!(flake.y >= config.spawn_row_min + 1);
                    prop_assert!(flake.y <= config.spawn_row_max + 1);
                }

                prop_assert!(report.active as usize <= MAX_SNOWFLAKES);
                prop_assert!(report.spawned <= field.config().new_snowflakes_count);
                for &h in field.terrain().heights() {
                    prop_assert!(h >= 10 && h <= height as i16 - 1);
                }
                for flake in field.pool().iter_active() {
                    prop_assert!(flake.x >= 0 && flake.x < width as i16);
                }
            }
        }
    }
}
