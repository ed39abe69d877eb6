use crate::config::GameOptions;
use crate::error::GameError;
use crate::games::leaderboard::{Leaderboard, LeaderboardEntry, Standing, GUGUDAN_LEADERBOARD};
use crate::games::screens::{result_lines, setup_lines, stats_line, timer_line};
use crate::games::session::{Screen, Session};
use crate::games::timer::{Tick, TimerSettings};
use crate::store::KeyValueStore;
use crate::terminal::{self, edit_line, Key, TerminalGuard};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_TIMER: TimerSettings = TimerSettings {
    start: 10.0,
    decrement: 0.1,
    min: 1.0,
};
pub const REWARD: u32 = 10;
const CLASSIC_STAGE_LIMIT: u32 = 20;
const MAX_EMAIL_LEN: usize = 64;
const MAX_ANSWER_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question
{
    pub a: u32,
    pub b: u32,
}

impl Question
{
    pub fn generate(stage: u32, rng: &mut impl Rng) -> Self
    {
        if stage <= CLASSIC_STAGE_LIMIT {
            Self {
                a: rng.gen_range(2..=9),
                b: rng.gen_range(2..=9),
            }
        } else {
            Self {
                a: rng.gen_range(2..=16),
                b: rng.gen_range(2..=10),
            }
        }
    }

    pub fn answer(&self) -> u32
    {
        self.a * self.b
    }
}

pub struct GugudanGame
{
    pub session: Session,
    pub question: Question,
    pub input: String,
}

impl GugudanGame
{
    pub fn new(timer: TimerSettings, now: Instant) -> Self
    {
        Self {
            session: Session::new(timer, now),
            question: Question { a: 2, b: 2 },
            input: String::new(),
        }
    }

    pub fn start(&mut self, email: &str, rng: &mut impl Rng, now: Instant) -> Result<(), GameError>
    {
        self.session.start(email, now)?;
        self.next_question(rng);
        info!(email = %self.session.email, "gugudan game started");
        Ok(())
    }

    pub fn key(&mut self, key: Key, rng: &mut impl Rng, now: Instant) -> bool
    {
        if !self.session.active {
            return false;
        }
        if key == Key::Enter {
            self.input.clear();
            return false;
        }
        if !edit_line(&mut self.input, key, MAX_ANSWER_LEN, |ch| ch.is_ascii_digit()) {
            return false;
        }

        let solved = self
            .input
            .parse::<u32>()
            .is_ok_and(|value| value == self.question.answer());
        if solved {
            self.session.advance(REWARD, now);
            self.next_question(rng);
            debug!(stage = self.session.stage, score = self.session.score, "solved");
        }
        solved
    }

    pub fn tick(&mut self, now: Instant) -> Tick
    {
        let tick = self.session.tick(now);
        if tick == Tick::Expired {
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
        self.input.clear();
    }

    fn next_question(&mut self, rng: &mut impl Rng)
    {
        self.input.clear();
        self.question = Question::generate(self.session.stage, rng);
    }
}

pub fn run_with_options<S: KeyValueStore>(options: GameOptions, store: S) -> Result<(), GameError>
{
    let mut term = TerminalGuard::enter()?;
    let mut rng = rand::thread_rng();
    let mut board = Leaderboard::new(store, GUGUDAN_LEADERBOARD);

    let start = Instant::now();
    let mut game = GugudanGame::new(options.timer, start);
    let mut email = options.email.unwrap_or_default();
    let mut message: Option<String> = None;
    let mut standing: Option<Standing> = None;
    let mut last_tick = start;

    loop {
        let now = Instant::now();
        for key in terminal::poll_keys()? {
            if key == Key::Quit {
                return Ok(());
            }
            match game.session.screen {
                Screen::Setup => {
                    if key == Key::Enter {
                        match game.start(&email, &mut rng, now) {
                            Ok(()) => {
                                email = game.session.email.clone();
                                message = None;
                                standing = None;
                            }
                            Err(GameError::InvalidEmail) => {
                                message = Some(GameError::InvalidEmail.to_string());
                            }
                            Err(err) => return Err(err),
                        }
                    } else {
                        edit_line(&mut email, key, MAX_EMAIL_LEN, |ch| !ch.is_control());
                    }
                }
                Screen::Playing => {
                    game.key(key, &mut rng, now);
                }
                Screen::GameOver => {}
                Screen::Result => {
                    if key == Key::Enter {
                        game.restart();
                    }
                }
            }
        }

        game.tick(now);
        if game.session.screen == Screen::GameOver {
            standing = game.finish(&mut board)?;
        }

        if last_tick.elapsed() >= Duration::from_millis(terminal::TICK_MS) {
            let lines = match game.session.screen {
                Screen::Setup => setup_lines("Gugudan", &email, message.as_deref()),
                Screen::Playing | Screen::GameOver => playing_lines(&game),
                Screen::Result => result_lines(
                    "Gugudan",
                    &game.session,
                    standing.as_ref(),
                    "pts",
                    Some(last_question(&game.question).as_str()),
                ),
            };
            term.present(&lines)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn last_question(question: &Question) -> String
{
    format!("Last question: {} × {} = {}", question.a, question.b, question.answer())
}

fn playing_lines(game: &GugudanGame) -> Vec<String>
{
    let (cols, _) = terminal::size();
    let mut lines = Vec::new();
    lines.push("Quiz Games - Gugudan".to_string());
    lines.push(stats_line(&game.session, ""));
    lines.push(timer_line(&game.session, cols.min(72)));
    lines.push(String::new());
    lines.push(format!(
        "    {} × {} = {}_",
        game.question.a, game.question.b, game.input
    ));
    lines.push(String::new());
    lines.push("Type the product. Enter clears. Esc quits.".to_string());
    lines
}
