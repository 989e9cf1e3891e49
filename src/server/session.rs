//! Per-connection session handling
//!
//! One `Session` per accepted connection, running the three-prompt
//! protocol: first operand, operator, second operand. The three raw lines
//! are pasted into a `SELECT` template and handed to the executor; nothing
//! is escaped or validated beyond the operator check. The resulting
//! injection surface is the intended behavior of the service.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use tracing::info;

use crate::backend::Backend;
use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::format;

/// Banner sent on connect
pub const WELCOME_BANNER: &str = "Bienvenue sur la calculette SQL\n";
/// Capability notice sent after the banner
pub const CAPABILITY_NOTICE: &str = "Vous pouvez effectuer des additions et des soustractions.\n";
/// Prompt for the first operand
pub const PROMPT_FIRST: &str = "Premier nombre: ";
/// Prompt for the operator
pub const PROMPT_OPERATOR: &str = "Operateur (+ ou -) : ";
/// Prompt for the second operand
pub const PROMPT_SECOND: &str = "Deuxieme nombre: ";
/// Rejection sent for an operator other than `+` or `-`
pub const REJECT_OPERATOR: &str =
    "Erreur : operateur non supporte. Nous acceptons uniquement '+' ou '-'.\n";

/// A client session
///
/// Owns the connection for its lifetime and borrows the process-wide
/// executor; the borrow is what keeps sessions serialized at the type
/// level.
pub struct Session<'a, B: Backend> {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: String,
    executor: &'a mut QueryExecutor<B>,
    reflect_backend_errors: bool,
}

impl<'a, B: Backend> Session<'a, B> {
    /// Create a session over an accepted connection
    pub fn new(
        stream: TcpStream,
        peer: String,
        executor: &'a mut QueryExecutor<B>,
        reflect_backend_errors: bool,
    ) -> Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);

        Ok(Self {
            reader,
            writer: stream,
            peer,
            executor,
            reflect_backend_errors,
        })
    }

    /// Run the prompt loop until the peer disconnects
    ///
    /// Returns `Ok(())` on a clean disconnect and `Err` on a transport
    /// failure; query failures never end the loop.
    pub fn run(mut self) -> Result<()> {
        self.send(WELCOME_BANNER)?;
        self.send(CAPABILITY_NOTICE)?;

        loop {
            let first = match self.prompt(PROMPT_FIRST)? {
                Some(line) => line,
                None => return Ok(()),
            };

            let operator = match self.prompt(PROMPT_OPERATOR)? {
                Some(line) => line,
                None => return Ok(()),
            };

            if operator != "+" && operator != "-" {
                // Restart at the first prompt; the operand read above is
                // discarded, never reused.
                self.send(REJECT_OPERATOR)?;
                continue;
            }

            let second = match self.prompt(PROMPT_SECOND)? {
                Some(line) => line,
                None => return Ok(()),
            };

            // Raw space-joined concatenation, no escaping.
            let query = format!("SELECT {} {} {}", first, operator, second);
            info!("Executing query from {}: {}", self.peer, query);

            let outcome = self.executor.execute(&query);
            self.send(&format::render(&outcome, self.reflect_backend_errors))?;
        }
    }

    /// Send a prompt and read the peer's answer
    ///
    /// Returns `None` on a zero-length read: the peer closed its half of
    /// the connection and the session must end.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.send(text)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Send a message to the client
    fn send(&mut self, message: &str) -> Result<()> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
