//! Wumpus Text Protocol (WTP).
//!
//! A GTP-shaped line protocol that lets an external front end drive the core
//! one decision tick at a time. Each request is an optional numeric id, a
//! command and its arguments; each response is `=<id> <message>` or
//! `?<id> <message>` followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `new_game [size] [pits]` - Start a new random game
//! - `seed <n>` - Fix the placement seed for following `new_game`s
//! - `depth <n>` - Set the search depth
//! - `mode <adversarial|single-agent>` - Set the search mode
//! - `load <size> <start> <wumpus> <gold> [pit...]` - Fixed layout, positions as `row,col`
//! - `showboard` - Render the board
//! - `status` - Player position and flags
//! - `score` - Current score
//! - `genmove` - Search, play and report the agent's move
//! - `play <row> <col>` - Play a given move
//!
//! ## Example
//!
//! ```ignore
//! use wumpus_agent::protocol::WtpEngine;
//! let mut engine = WtpEngine::new(Default::default()).unwrap();
//! engine.run().unwrap();
//! ```

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::board::Pos;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::session::Session;
use crate::state::{GameState, Layout};

/// The list of known WTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "load",
    "mode",
    "name",
    "new_game",
    "play",
    "protocol_version",
    "quit",
    "score",
    "seed",
    "showboard",
    "status",
];

/// Protocol engine state.
pub struct WtpEngine {
    session: Session,
}

impl WtpEngine {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = match self.execute(&command, args) {
                Ok(message) => (true, message),
                Err(message) => {
                    warn!(%command, %message, "command failed");
                    (false, message)
                }
            };
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command, returning the success or failure message.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "new_game" => {
                let mut config = self.session.config().clone();
                if let Some(size) = args.first() {
                    config.board_size = parse_number(size, "size")?;
                }
                if let Some(pits) = args.get(1) {
                    config.pit_count = parse_number(pits, "pit count")?;
                }
                let state = config.new_game().map_err(|e| e.to_string())?;
                *self.session.config_mut() = config;
                self.session.reset(state);
                Ok(String::new())
            }

            "seed" => {
                let seed = args.first().ok_or("missing argument")?;
                self.session.config_mut().seed = Some(parse_number(seed, "seed")?);
                Ok(String::new())
            }

            "depth" => {
                let depth = args.first().ok_or("missing argument")?;
                let depth: u32 = parse_number(depth, "depth")?;
                if depth == 0 {
                    return Err("depth must be at least 1".to_string());
                }
                self.session.config_mut().depth = depth;
                Ok(String::new())
            }

            "mode" => {
                let mode = args.first().ok_or("missing argument")?;
                self.session.config_mut().mode = mode.parse()?;
                Ok(String::new())
            }

            "load" => {
                if args.len() < 4 {
                    return Err("usage: load <size> <start> <wumpus> <gold> [pit...]".to_string());
                }
                let layout = Layout {
                    size: parse_number(args[0], "size")?,
                    start: parse_pos(args[1])?,
                    wumpus: parse_pos(args[2])?,
                    gold: parse_pos(args[3])?,
                    pits: args[4..]
                        .iter()
                        .map(|a| parse_pos(a))
                        .collect::<Result<_, _>>()?,
                };
                let state = GameState::from_layout(&layout).map_err(|e| e.to_string())?;
                self.session.config_mut().board_size = layout.size;
                self.session.config_mut().pit_count = layout.pits.len();
                self.session.reset(state);
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.session.state().render().trim_end())),

            "status" => {
                let s = self.session.state();
                let p = s.player_pos();
                Ok(format!(
                    "position={},{} score={} wumpus_killed={} gold_collected={} armed={} game_over={} won={}",
                    p.row,
                    p.col,
                    s.score(),
                    s.wumpus_killed(),
                    s.gold_collected(),
                    s.player_armed(),
                    s.game_over(),
                    s.won()
                ))
            }

            "score" => Ok(self.session.state().score().to_string()),

            "genmove" => match self.session.tick().map_err(|e| e.to_string())? {
                Some(tick) => Ok(format!("{} {}", tick.to.row, tick.to.col)),
                None => Err(GameError::GameOver.to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return Err("missing arguments".to_string());
                }
                let to = Pos::new(parse_number(args[0], "row")?, parse_number(args[1], "col")?);
                self.session.play(to).map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            _ => Err(format!("unknown command: {command}")),
        }
    }
}

fn parse_number<T: std::str::FromStr>(arg: &str, what: &str) -> Result<T, String> {
    arg.parse().map_err(|_| format!("invalid {what}: {arg}"))
}

/// Parse a `row,col` position.
fn parse_pos(arg: &str) -> Result<Pos, String> {
    let (row, col) = arg
        .split_once(',')
        .ok_or_else(|| format!("invalid position: {arg} (expected row,col)"))?;
    Ok(Pos::new(
        parse_number(row.trim(), "row")?,
        parse_number(col.trim(), "col")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> WtpEngine {
        WtpEngine::new(GameConfig {
            seed: Some(1),
            depth: 3,
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = WtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = WtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_pos() {
        assert_eq!(parse_pos("2,3"), Ok(Pos::new(2, 3)));
        assert_eq!(parse_pos("2, 3"), Ok(Pos::new(2, 3)));
        assert!(parse_pos("2;3").is_err());
        assert!(parse_pos("a,3").is_err());
    }

    #[test]
    fn test_name_and_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("name", &[]), Ok("wumpus-agent".to_string()));
        assert_eq!(engine.execute("known_command", &["genmove"]), Ok("true".to_string()));
        assert_eq!(engine.execute("known_command", &["komi"]), Ok("false".to_string()));
        assert!(engine.execute("known_command", &[]).is_err());
        assert!(engine.execute("komi", &["7.5"]).is_err());
    }

    #[test]
    fn test_load_and_play_to_win() {
        let mut engine = engine();
        assert!(engine.execute("load", &["3", "2,0", "1,0", "2,1"]).is_ok());
        assert!(engine.execute("play", &["1", "0"]).is_ok());
        assert!(engine.execute("play", &["1", "1"]).is_ok());
        assert!(engine.execute("play", &["2", "1"]).is_ok());
        assert!(engine.execute("play", &["2", "0"]).is_ok());
        let status = engine.execute("status", &[]).unwrap();
        assert!(status.contains("won=true"), "{status}");
        assert_eq!(engine.execute("score", &[]), Ok("3496".to_string()));
        assert!(engine.execute("genmove", &[]).is_err());
    }

    #[test]
    fn test_play_rejects_illegal_move() {
        let mut engine = engine();
        let before = engine.session.state().clone();
        assert!(engine.execute("play", &["0", "0"]).is_err());
        assert_eq!(engine.session.state(), &before);
    }

    #[test]
    fn test_new_game_and_depth() {
        let mut engine = engine();
        assert!(engine.execute("new_game", &["7", "3"]).is_ok());
        assert_eq!(engine.session.state().size(), 7);
        assert!(engine.execute("new_game", &["3", "5"]).is_err());
        assert!(engine.execute("depth", &["0"]).is_err());
        assert!(engine.execute("depth", &["2"]).is_ok());
        assert!(engine.execute("mode", &["single-agent"]).is_ok());
        assert!(engine.execute("genmove", &[]).is_ok());
    }

    #[test]
    fn test_new_game_rejects_oversized_requests() {
        let mut engine = engine();
        let before = engine.session.state().clone();
        let input = b"new_game 6 18446744073709551615\nnew_game 100000\nname\n";
        let mut output = Vec::new();
        engine.serve(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let responses: Vec<&str> = text.split("\n\n").collect();
        assert!(responses[0].starts_with("? board of size 6"), "{text}");
        assert!(responses[1].starts_with("? board size 100000"), "{text}");
        assert_eq!(responses[2], "= wumpus-agent");
        assert_eq!(engine.session.state(), &before);
        assert_eq!(engine.session.config().board_size, 6);
    }

    #[test]
    fn test_serve_formats_responses() {
        let mut engine = engine();
        let input = b"# comment\n\n1 name\nbogus\nquit\nname\n";
        let mut output = Vec::new();
        engine.serve(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 wumpus-agent\n\n? unknown command: bogus\n\n= \n\n"
        );
    }
}
