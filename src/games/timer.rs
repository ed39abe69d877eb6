use std::time::Instant;

/// Percentage of the stage budget below which the timer is drawn as urgent.
pub const WARNING_PERCENT: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerSettings
{
    pub start: f32,
    pub decrement: f32,
    pub min: f32,
}

impl TimerSettings
{
    pub fn budget_for(&self, stage: u32) -> f32
    {
        let steps = stage.saturating_sub(1) as f32;
        (self.start - steps * self.decrement).max(self.min)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick
{
    Running { time_left: f32, percent: f32 },
    Expired,
    Stopped,
}

/// Countdown for a single stage. Each `tick` subtracts the wall-clock time
/// since the previous tick; `restart` starts a fresh budget without carrying
/// over drift, and `cancel` turns later ticks into no-ops.
#[derive(Clone, Debug)]
pub struct StageTimer
{
    budget: f32,
    time_left: f32,
    last_tick: Instant,
    cancelled: bool,
}

impl StageTimer
{
    pub fn new(budget: f32, now: Instant) -> Self
    {
        Self {
            budget,
            time_left: budget,
            last_tick: now,
            cancelled: false,
        }
    }

    pub fn restart(&mut self, budget: f32, now: Instant)
    {
        *self = Self::new(budget, now);
    }

    pub fn cancel(&mut self)
    {
        self.cancelled = true;
    }

    pub fn time_left(&self) -> f32
    {
        self.time_left
    }

    pub fn percent(&self) -> f32
    {
        if self.budget <= 0.0 {
            return 0.0;
        }
        (self.time_left / self.budget * 100.0).clamp(0.0, 100.0)
    }

    pub fn tick(&mut self, now: Instant) -> Tick
    {
        if self.cancelled {
            return Tick::Stopped;
        }

        let delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.time_left -= delta;

        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.cancelled = true;
            return Tick::Expired;
        }

        Tick::Running {
            time_left: self.time_left,
            percent: self.percent(),
        }
    }
}
