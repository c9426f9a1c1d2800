use std::path::PathBuf;

use chip8_core::Config;
use thiserror::Error;

use crate::constants::CYCLES_PER_TICK;

pub const USAGE: &str = "usage: chip8_vm [--permissive] [--seed N] [--speed N] [ROM]";

/// Everything the command line can change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Asks with a file dialog when there is none
    pub rom: Option<PathBuf>,
    pub machine: Config,
    pub cycles_per_tick: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rom: None,
            machine: Config::default(),
            cycles_per_tick: CYCLES_PER_TICK,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("{flag} expects a number, got {value:?}")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("unknown flag {0}")]
    UnknownFlag(String),
    #[error("only one rom can be run at a time")]
    TooManyRoms,
}

impl Settings {
    /// Parses the arguments following the program name
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--permissive" => settings.machine = settings.machine.permissive(),
                "--seed" => {
                    let seed = number(&mut args, "--seed")?;
                    settings.machine = settings.machine.with_seed(seed);
                }
                "--speed" => settings.cycles_per_tick = number(&mut args, "--speed")?,
                flag if flag.starts_with("--") => {
                    return Err(SettingsError::UnknownFlag(flag.to_string()));
                }
                _ if settings.rom.is_some() => return Err(SettingsError::TooManyRoms),
                path => settings.rom = Some(PathBuf::from(path)),
            }
        }
        Ok(settings)
    }
}

fn number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, SettingsError> {
    let value = args.next().ok_or(SettingsError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| SettingsError::InvalidNumber { flag, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8_core::OpcodePolicy;

    fn parse(args: &[&str]) -> Result<Settings, SettingsError> {
        Settings::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(parse(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn parses_every_flag() {
        let settings =
            parse(&["--permissive", "--seed", "7", "--speed", "20", "pong.ch8"]).unwrap();
        assert_eq!(settings.rom, Some(PathBuf::from("pong.ch8")));
        assert_eq!(settings.machine.opcode_policy, OpcodePolicy::Permissive);
        assert_eq!(settings.machine.rng_seed, Some(7));
        assert_eq!(settings.cycles_per_tick, 20);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse(&["--seed"]), Err(SettingsError::MissingValue("--seed")));
        assert_eq!(
            parse(&["--speed", "fast"]),
            Err(SettingsError::InvalidNumber {
                flag: "--speed",
                value: "fast".to_string()
            })
        );
        assert_eq!(parse(&["--turbo"]), Err(SettingsError::UnknownFlag("--turbo".to_string())));
        assert_eq!(parse(&["a.ch8", "b.ch8"]), Err(SettingsError::TooManyRoms));
    }
}
