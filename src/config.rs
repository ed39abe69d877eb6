use crate::games::timer::TimerSettings;
use std::env;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "QUIZ_GAMES_DATA_DIR";
const APP_DIR: &str = "quiz-games";

#[derive(Clone, Debug, PartialEq)]
pub struct GameOptions
{
    pub timer: TimerSettings,
    pub email: Option<String>,
}

impl GameOptions
{
    pub fn from_args(args: &[String], defaults: TimerSettings) -> Result<Self, String>
    {
        let mut timer = defaults;
        let mut email = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(value) => Ok(value.clone()),
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| format!("Expected value after {flag}")),
                }
            };
            match flag {
                "--start-timer" => timer.start = parse_seconds(flag, &value()?)?,
                "--decrement" => timer.decrement = parse_seconds(flag, &value()?)?,
                "--min-timer" => timer.min = parse_seconds(flag, &value()?)?,
                "--email" => email = Some(value()?),
                _ => return Err(format!("Unknown option '{arg}'")),
            }
        }

        if timer.start <= 0.0 || timer.min <= 0.0 {
            return Err("Timers must be positive".to_string());
        }
        if timer.min > timer.start {
            return Err("--min-timer cannot exceed --start-timer".to_string());
        }

        Ok(Self { timer, email })
    }
}

fn parse_seconds(flag: &str, value: &str) -> Result<f32, String>
{
    let parsed = value
        .parse::<f32>()
        .map_err(|_| format!("{flag} must be a number of seconds"))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(format!("{flag} must be zero or more"));
    }
    Ok(parsed)
}

pub fn take_data_dir(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>), String>
{
    let mut data_dir = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--data-dir" {
            let value = iter
                .next()
                .ok_or_else(|| "Expected value after --data-dir".to_string())?;
            data_dir = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--data-dir=") {
            data_dir = Some(PathBuf::from(value));
        } else {
            rest.push(arg);
        }
    }
    Ok((data_dir, rest))
}

pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf, String>
{
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    system_data_dir()
}

fn system_data_dir() -> Result<PathBuf, String>
{
    use directories::BaseDirs;

    let base_dirs =
        BaseDirs::new().ok_or_else(|| "Could not determine the user data directory".to_string())?;
    Ok(base_dirs.data_dir().join(APP_DIR))
}

#[cfg(test)]
mod tests
{
    use super::*;

    const DEFAULTS: TimerSettings = TimerSettings {
        start: 30.0,
        decrement: 0.1,
        min: 2.0,
    };

    fn args(list: &[&str]) -> Vec<String>
    {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags()
    {
        let options = GameOptions::from_args(&[], DEFAULTS).unwrap();
        assert_eq!(options.timer, DEFAULTS);
        assert!(options.email.is_none());
    }

    #[test]
    fn inline_and_separate_values()
    {
        let options = GameOptions::from_args(
            &args(&["--start-timer=12", "--min-timer", "3", "--email=a@b.c"]),
            DEFAULTS,
        )
        .unwrap();
        assert_eq!(options.timer.start, 12.0);
        assert_eq!(options.timer.min, 3.0);
        assert_eq!(options.timer.decrement, 0.1);
        assert_eq!(options.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn rejects_bad_values()
    {
        assert!(GameOptions::from_args(&args(&["--start-timer=abc"]), DEFAULTS).is_err());
        assert!(GameOptions::from_args(&args(&["--decrement"]), DEFAULTS).is_err());
        assert!(GameOptions::from_args(&args(&["--min-timer=40"]), DEFAULTS).is_err());
        assert!(GameOptions::from_args(&args(&["--lives=9"]), DEFAULTS).is_err());
    }

    #[test]
    fn data_dir_is_split_off()
    {
        let (dir, rest) =
            take_data_dir(args(&["--email=a@b.c", "--data-dir", "/tmp/q", "--min-timer=1"]))
                .unwrap();
        assert_eq!(dir, Some(PathBuf::from("/tmp/q")));
        assert_eq!(rest, args(&["--email=a@b.c", "--min-timer=1"]));

        let (dir, _) = take_data_dir(args(&["--data-dir=/var/q"])).unwrap();
        assert_eq!(dir, Some(PathBuf::from("/var/q")));
        assert!(resolve_data_dir(Some(PathBuf::from("/x"))).unwrap().ends_with("x"));
    }
}
