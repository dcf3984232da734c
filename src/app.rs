//! Interactive loop for the Pokédex CLI
//!
//! Reads one name per line, resolves it and prints the result. Every lookup
//! error is turned into a message; only the exit command or end of input stops
//! the loop.

use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cache::RecordStore;
use crate::data::{PokemonName, RemoteSource};
use crate::presenter::Presenter;
use crate::resolver::{Origin, Resolution, Resolver};

/// Input that ends the session, matched case-insensitively
pub const EXIT_COMMAND: &str = "salir";

/// What the loop should do after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The read-eval-print loop
pub struct App<S, R> {
    resolver: Resolver<S, R>,
    presenter: Presenter,
}

impl<S: RecordStore, R: RemoteSource> App<S, R> {
    pub fn new(resolver: Resolver<S, R>, presenter: Presenter) -> Self {
        Self {
            resolver,
            presenter,
        }
    }

    pub fn resolver(&self) -> &Resolver<S, R> {
        &self.resolver
    }

    /// Runs the loop until the exit command or end of input
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 reach name
    /// validation as replacement characters instead of ending the session.
    pub async fn run<I, W>(&self, mut input: I, out: &mut W) -> io::Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", self.presenter.welcome())?;

        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.presenter.prompt())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                // End of input behaves like the exit command
                writeln!(out)?;
                writeln!(out, "{}", self.presenter.farewell())?;
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line, out).await? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Handles a single line of input
    pub async fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> io::Result<Flow> {
        let input = line.trim();
        if input.eq_ignore_ascii_case(EXIT_COMMAND) {
            writeln!(out, "{}", self.presenter.farewell())?;
            return Ok(Flow::Quit);
        }

        let name = match PokemonName::parse(input) {
            Ok(name) => name,
            Err(e) => {
                let message = format!("{} Try again.", e);
                writeln!(out, "{}", self.presenter.error(&message))?;
                return Ok(Flow::Continue);
            }
        };

        match self.resolver.resolve(&name).await {
            Ok(resolution) => self.report(&name, resolution, out)?,
            Err(e) => writeln!(out, "{}", self.presenter.error(&e.to_string()))?,
        }

        Ok(Flow::Continue)
    }

    fn report<W: Write>(
        &self,
        name: &PokemonName,
        resolution: Resolution,
        out: &mut W,
    ) -> io::Result<()> {
        let p = &self.presenter;
        match resolution.origin {
            Origin::Cache => writeln!(out, "{}", p.loading_local(name.as_str()))?,
            Origin::Remote => {
                writeln!(out, "{}", p.fetched_remote(name.as_str()))?;
                match &resolution.persist_error {
                    None => {
                        let location = self
                            .resolver
                            .store()
                            .location(name.as_str())
                            .map(|path| path.display().to_string())
                            .unwrap_or_else(|| "the local Pokédex".to_string());
                        writeln!(out, "{}", p.saved(&resolution.record.name, &location))?;
                    }
                    Some(e) => {
                        let message = format!("could not save to the local Pokédex: {}", e);
                        writeln!(out, "{}", p.warning(&message))?;
                    }
                }
            }
        }

        writeln!(out, "{}", p.render(&resolution.record))
    }
}
