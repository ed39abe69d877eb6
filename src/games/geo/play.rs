use super::catalog::LOCATIONS;
use super::map::TerminalMap;
use super::{Feedback, GeoGame, START_LIVES};
use crate::config::GameOptions;
use crate::error::GameError;
use crate::games::leaderboard::{Leaderboard, Standing, GEO_LEADERBOARD};
use crate::games::screens::{result_lines, setup_lines, stats_line, timer_line};
use crate::games::session::Screen;
use crate::store::KeyValueStore;
use crate::terminal::{self, edit_line, paint, Key, TerminalGuard, GREEN, RED, YELLOW};
use std::time::{Duration, Instant};

const MAX_EMAIL_LEN: usize = 64;
const MAX_ANSWER_LEN: usize = 40;

pub fn run_with_options<S: KeyValueStore>(options: GameOptions, store: S) -> Result<(), GameError>
{
    let mut term = TerminalGuard::enter()?;
    let mut rng = rand::thread_rng();
    let mut board = Leaderboard::new(store, GEO_LEADERBOARD);

    let start = Instant::now();
    let mut map = TerminalMap::new(start);
    let mut game = GeoGame::new(options.timer, LOCATIONS, start);
    let mut email = options.email.unwrap_or_default();
    let mut answer = String::new();
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
                        match game.start(&email, &mut rng, &mut map, now) {
                            Ok(()) => {
                                email = game.session.email.clone();
                                message = None;
                                answer.clear();
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
                    if key == Key::Enter {
                        game.submit(&answer, &mut rng, &mut map, now)?;
                        answer.clear();
                    } else {
                        edit_line(&mut answer, key, MAX_ANSWER_LEN, |ch| !ch.is_control());
                    }
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
                Screen::Setup => setup_lines("Geo Guess", &email, message.as_deref()),
                Screen::Playing | Screen::GameOver => {
                    playing_lines(&game, &map, &answer, now)
                }
                Screen::Result => result_lines(
                    "Geo Guess",
                    &game.session,
                    standing.as_ref(),
                    "pts",
                    feedback_text(&game.feedback).as_deref(),
                ),
            };
            term.present(&lines)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn playing_lines(game: &GeoGame, map: &TerminalMap, answer: &str, now: Instant) -> Vec<String>
{
    let (cols, rows) = terminal::size();
    let map_height = rows.saturating_sub(10).clamp(6, 20);
    let map_width = cols.saturating_sub(2).clamp(20, 90);

    let mut lines = Vec::new();
    lines.push("Quiz Games - Geo Guess".to_string());
    let hearts = format!(
        "Lives: {}{}",
        paint(&"♥".repeat(game.lives as usize), RED),
        "·".repeat(START_LIVES.saturating_sub(game.lives) as usize)
    );
    lines.push(stats_line(&game.session, &hearts));
    lines.push(timer_line(&game.session, map_width));
    lines.extend(map.render(map_width, map_height, now));
    lines.push(format!("Where is this? {answer}_"));
    lines.push(feedback_text(&game.feedback).unwrap_or_default());
    lines.push("Type the name and press Enter. Esc quits.".to_string());
    lines
}

fn feedback_text(feedback: &Feedback) -> Option<String>
{
    match feedback {
        Feedback::None => None,
        Feedback::Correct { name } => Some(paint(&format!("Correct! ({name}) +{}", super::REWARD), GREEN)),
        Feedback::Wrong {
            lives_left,
            hint: Some(hint),
        } => Some(paint(
            &format!("Wrong! Hint: \"{hint}...\" ({lives_left} left)"),
            YELLOW,
        )),
        Feedback::Wrong {
            lives_left,
            hint: None,
        } => Some(paint(&format!("Wrong! Try again. ({lives_left} left)"), YELLOW)),
        Feedback::Revealed { name } => Some(paint(&format!("The answer was [{name}]."), RED)),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn feedback_messages()
    {
        assert!(feedback_text(&Feedback::None).is_none());
        let wrong = feedback_text(&Feedback::Wrong {
            lives_left: 2,
            hint: Some('F'),
        })
        .unwrap();
        assert!(wrong.contains("Hint: \"F...\" (2 left)"));
        let revealed = feedback_text(&Feedback::Revealed { name: "France" }).unwrap();
        assert!(revealed.contains("[France]"));
        let correct = feedback_text(&Feedback::Correct { name: "Japan" }).unwrap();
        assert!(correct.contains("Correct! (Japan) +100"));
    }
}
