use std::io::{Read, Write};

use anyhow::Context;
use tracing::debug;

use crate::{
    args,
    builtin::{Errors, Flow},
    config::Config,
    launcher::Launcher,
    terminal::{read_line, write_prompt, Input, ReadLineError},
};

/// The read, split, dispatch loop.
pub struct Shell<'cfg, L> {
    config: &'cfg Config,
    launcher: L,
}

impl<'cfg, L: Launcher> Shell<'cfg, L> {
    pub fn new(config: &'cfg Config, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Routes one argument vector to a builtin or to the launcher.
    ///
    /// Only a builtin can return [`Flow::Stop`].
    pub fn dispatch(&mut self, args: &[&str], stdout: &mut dyn Write) -> Result<Flow, Errors> {
        let Some(name) = args.first() else {
            return Ok(Flow::Continue);
        };

        match self.config.builtins.lookup(name) {
            Some(builtin) => {
                debug!(name, ?builtin, "running builtin");
                builtin.run(&self.config.builtins, args, stdout)
            }
            None => {
                // the child shares our stdout
                stdout.flush()?;
                self.launcher.launch(args)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Like [`Shell::dispatch`], but reports failures on `stderr` and
    /// carries on.
    pub fn execute(
        &mut self,
        args: &[&str],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> std::io::Result<Flow> {
        match self.dispatch(args, stdout) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                debug!(error = ?e, "command failed");
                writeln!(stderr, "{}: {}", self.config.name, e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Prompts and executes lines until `exit` or the end of `input`.
    ///
    /// Only fatal errors are returned: a failed allocation or a broken
    /// terminal.
    pub fn run(
        &mut self,
        input: &mut impl Read,
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> anyhow::Result<()> {
        loop {
            write_prompt(stdout, self.config.prompt).context("Unable to write the prompt")?;
            stderr.flush()?;

            let line = match read_line(input)? {
                Input::Line(line) => line,
                Input::EndOfInput => {
                    debug!("end of input");
                    writeln!(stdout)?;
                    break;
                }
            };

            let args = args::split(line.as_str()).map_err(ReadLineError::from)?;
            debug!(args = ?&args[..], "read command");

            let flow = self.execute(&args, stdout, stderr)?;
            stdout.flush()?;

            if flow == Flow::Stop {
                debug!("exit requested");
                break;
            }
        }

        Ok(())
    }
}
