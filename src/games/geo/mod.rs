pub mod catalog;
pub mod map;
mod play;

pub use play::run_with_options;

use crate::error::GameError;
use crate::games::leaderboard::{Leaderboard, LeaderboardEntry, Standing};
use crate::games::session::{validate_email, Screen, Session};
use crate::games::timer::{Tick, TimerSettings};
use crate::store::KeyValueStore;
use catalog::{Location, LocationPicker};
use map::{FlyTo, MapView, FLIGHT_DURATION};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_TIMER: TimerSettings = TimerSettings {
    start: 30.0,
    decrement: 0.1,
    min: 2.0,
};
pub const REWARD: u32 = 100;
pub const START_LIVES: u8 = 3;
pub const CITY_STAGE_THRESHOLD: u32 = 10;
const HINT_AFTER_MISSES: u8 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback
{
    None,
    Correct { name: &'static str },
    Wrong { lives_left: u8, hint: Option<char> },
    Revealed { name: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer
{
    Correct,
    Wrong,
    GameOver,
    Ignored,
}

pub struct GeoGame<'a>
{
    pub session: Session,
    pub lives: u8,
    pub wrong_count: u8,
    pub current: Option<&'a Location>,
    pub feedback: Feedback,
    picker: LocationPicker<'a>,
}

impl<'a> GeoGame<'a>
{
    pub fn new(timer: TimerSettings, catalog: &'a [Location], now: Instant) -> Self
    {
        Self {
            session: Session::new(timer, now),
            lives: START_LIVES,
            wrong_count: 0,
            current: None,
            feedback: Feedback::None,
            picker: LocationPicker::new(catalog, CITY_STAGE_THRESHOLD),
        }
    }

    pub fn start(
        &mut self,
        email: &str,
        rng: &mut impl Rng,
        map: &mut impl MapView,
        now: Instant,
    ) -> Result<(), GameError>
    {
        validate_email(email)?;
        let first = self.picker.pick(1, rng).ok_or(GameError::EmptyCatalog)?;

        self.session.start(email, now)?;
        self.lives = START_LIVES;
        self.feedback = Feedback::None;
        self.show(first, map, now);
        info!(email = %self.session.email, "geo game started");
        Ok(())
    }

    pub fn submit(
        &mut self,
        answer: &str,
        rng: &mut impl Rng,
        map: &mut impl MapView,
        now: Instant,
    ) -> Result<Answer, GameError>
    {
        if !self.session.active {
            return Ok(Answer::Ignored);
        }
        let Some(location) = self.current else {
            return Ok(Answer::Ignored);
        };

        if location.accepts(answer) {
            self.session.advance(REWARD, now);
            self.feedback = Feedback::Correct {
                name: location.primary_name(),
            };
            let next = self
                .picker
                .pick(self.session.stage, rng)
                .ok_or(GameError::EmptyCatalog)?;
            self.show(next, map, now);
            debug!(stage = self.session.stage, score = self.session.score, "correct answer");
            return Ok(Answer::Correct);
        }

        self.wrong_count += 1;
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.feedback = Feedback::Revealed {
                name: location.primary_name(),
            };
            self.session.end();
            info!(stage = self.session.stage, score = self.session.score, "out of lives");
            return Ok(Answer::GameOver);
        }

        let hint = if self.wrong_count >= HINT_AFTER_MISSES {
            location.hint()
        } else {
            None
        };
        self.feedback = Feedback::Wrong {
            lives_left: self.lives,
            hint,
        };
        Ok(Answer::Wrong)
    }

    pub fn tick(&mut self, now: Instant) -> Tick
    {
        let tick = self.session.tick(now);
        if tick == Tick::Expired {
            if let Some(location) = self.current {
                self.feedback = Feedback::Revealed {
                    name: location.primary_name(),
                };
            }
            info!(stage = self.session.stage, score = self.session.score, "time ran out");
        }
        tick
    }

    pub fn finish<S: KeyValueStore>(
        &mut self,
        board: &mut Leaderboard<S>,
    ) -> Result<Option<Standing>, GameError>
    {
        if self.session.screen != Screen::GameOver {
            return Ok(None);
        }
        let entry = LeaderboardEntry::new(&self.session.email, self.session.score, self.session.stage);
        let standing = board.record(entry)?;
        self.session.show_result();
        Ok(Some(standing))
    }

    pub fn restart(&mut self)
    {
        self.session.restart();
        self.current = None;
        self.feedback = Feedback::None;
    }

    fn show(&mut self, location: &'a Location, map: &mut impl MapView, now: Instant)
    {
        self.current = Some(location);
        self.wrong_count = 0;
        map.fly_to(
            FlyTo {
                lat: location.lat,
                lng: location.lng,
                zoom: location.zoom,
                duration: FLIGHT_DURATION,
            },
            now,
        );
    }
}
