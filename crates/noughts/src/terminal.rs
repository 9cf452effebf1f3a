//! Line-oriented terminal frontend for the client.

use std::io::{self, Write};

use noughts_game::Board;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::client::{ClientEvent, Frontend, GameResult};

/// Shown when a game ends because a connection failed.
pub const DISCONNECT_NOTICE: &str = "Either the server shut down or the other player disconnected.";

const PROMPT: &str = "Enter 0-8 to make a move, or 9 for number of active players: ";

/// Reads moves from `input` and prints the game to `output`.
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
}

impl TerminalFrontend<BufReader<Stdin>, io::Stdout> {
    /// A frontend on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), io::stdout())
    }
}

impl<R, W> TerminalFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints the closing line, after `notice` if there is one.
    pub fn game_over(&mut self, notice: Option<&str>) -> io::Result<()> {
        if let Some(notice) = notice {
            writeln!(self.output, "{notice}")?;
        }
        writeln!(self.output, "Game over.")?;
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parses a typed move: the first character must be a digit.
fn parse_move(line: &str) -> Option<i32> {
    let digit = line.chars().next()?.to_digit(10)?;
    i32::try_from(digit).ok()
}

impl<R, W> Frontend for TerminalFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn show(&mut self, event: &ClientEvent, board: &Board) -> io::Result<()> {
        let out = &mut self.output;
        match event {
            ClientEvent::Assigned(_) => writeln!(out, "Tic-Tac-Toe\n------------")?,
            ClientEvent::Holding => writeln!(out, "Waiting for a second player...")?,
            ClientEvent::Started(me) => {
                writeln!(out, "Game on!")?;
                writeln!(out, "You are {}'s", me.mark())?;
                write!(out, "{board}")?;
            }
            ClientEvent::YourTurn => writeln!(out, "Your move...")?,
            ClientEvent::Rejected => {
                writeln!(out, "That position has already been played. Try again.")?
            }
            ClientEvent::PlayerCount(n) => {
                writeln!(out, "There are currently {n} active players.")?
            }
            ClientEvent::BoardUpdated { .. } => write!(out, "{board}")?,
            ClientEvent::OpponentTurn => writeln!(out, "Waiting for other players move...")?,
            ClientEvent::Finished(GameResult::Won) => writeln!(out, "You win!")?,
            ClientEvent::Finished(GameResult::Lost) => writeln!(out, "You lost.")?,
            ClientEvent::Finished(GameResult::Draw) => writeln!(out, "Draw.")?,
        }
        out.flush()
    }

    async fn choose_move(&mut self, _board: &Board) -> io::Result<i32> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            match parse_move(&line) {
                Some(value) => {
                    writeln!(self.output)?;
                    return Ok(value);
                }
                None => writeln!(self.output, "\nInvalid input. Try again.")?,
            }
        }
    }
}
