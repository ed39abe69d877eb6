use crate::games::timer::{StageTimer, Tick, TimerSettings};
use crate::error::GameError;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen
{
    Setup,
    Playing,
    GameOver,
    Result,
}

#[derive(Clone, Debug)]
pub struct Session
{
    pub email: String,
    pub stage: u32,
    pub score: u32,
    pub active: bool,
    pub screen: Screen,
    timer: StageTimer,
    settings: TimerSettings,
}

impl Session
{
    pub fn new(settings: TimerSettings, now: Instant) -> Self
    {
        let mut timer = StageTimer::new(settings.budget_for(1), now);
        timer.cancel();
        Self {
            email: String::new(),
            stage: 1,
            score: 0,
            active: false,
            screen: Screen::Setup,
            timer,
            settings,
        }
    }

    pub fn start(&mut self, email: &str, now: Instant) -> Result<(), GameError>
    {
        let email = validate_email(email)?;
        self.email = email.to_string();
        self.stage = 1;
        self.score = 0;
        self.active = true;
        self.screen = Screen::Playing;
        self.timer.restart(self.settings.budget_for(1), now);
        Ok(())
    }

    pub fn advance(&mut self, reward: u32, now: Instant)
    {
        self.score += reward;
        self.stage += 1;
        self.timer.restart(self.stage_budget(), now);
    }

    pub fn tick(&mut self, now: Instant) -> Tick
    {
        if !self.active {
            return Tick::Stopped;
        }
        let tick = self.timer.tick(now);
        if tick == Tick::Expired {
            self.end();
        }
        tick
    }

    pub fn end(&mut self)
    {
        self.active = false;
        self.timer.cancel();
        self.screen = Screen::GameOver;
    }

    pub fn show_result(&mut self)
    {
        self.screen = Screen::Result;
    }

    pub fn restart(&mut self)
    {
        self.active = false;
        self.timer.cancel();
        self.screen = Screen::Setup;
    }

    pub fn stage_budget(&self) -> f32
    {
        self.settings.budget_for(self.stage)
    }

    pub fn time_left(&self) -> f32
    {
        self.timer.time_left()
    }

    pub fn time_percent(&self) -> f32
    {
        self.timer.percent()
    }
}

pub fn validate_email(raw: &str) -> Result<&str, GameError>
{
    let email = raw.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(GameError::InvalidEmail);
    }
    Ok(email)
}
