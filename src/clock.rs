//! Driver-side timing.  Turns a monotonic millisecond clock into frame
//! deltas and spawn triggers without touching `GameState`.

use crate::config::Tuning;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockTick {
    /// Time since the previous tick; zero on the first one.
    pub delta_ms: f32,
    pub spawn_enemy: bool,
    pub spawn_boss: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_tick: Option<f64>,
    last_enemy_spawn: f64,
    last_boss_spawn: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_ms: f64, tuning: &Tuning) -> ClockTick {
        let delta_ms = match self.last_tick {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_tick = Some(now_ms);

        let spawn_enemy = now_ms - self.last_enemy_spawn >= f64::from(tuning.enemy_spawn_interval_ms);
        if spawn_enemy {
            self.last_enemy_spawn = now_ms;
        }
        let spawn_boss = now_ms - self.last_boss_spawn >= f64::from(tuning.boss_spawn_interval_ms);
        if spawn_boss {
            self.last_boss_spawn = now_ms;
        }

        ClockTick {
            delta_ms,
            spawn_enemy,
            spawn_boss,
        }
    }

    /// Call when play resumes so the pause isn't applied as one huge delta.
    /// Spawn timers are shifted by the same gap.
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(last) = self.last_tick {
            let gap = (now_ms - last).max(0.0);
            self.last_enemy_spawn += gap;
            self.last_boss_spawn += gap;
        }
        self.last_tick = Some(now_ms);
    }

    /// Forget all references; the next tick starts a new game's timeline.
    pub fn reset(&mut self, now_ms: f64) {
        *self = Self {
            last_tick: None,
            last_enemy_spawn: now_ms,
            last_boss_spawn: now_ms,
        };
    }
}
