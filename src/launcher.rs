use std::{
    io::ErrorKind,
    process::{Child, Command, ExitStatus},
};

use tracing::{debug, trace};

use crate::builtin::Errors;

/// Runs everything that is not a builtin.
pub trait Launcher {
    /// Runs `args[0]` with `args` as its argument vector and blocks until the
    /// child has terminated. An empty vector is a no-op.
    fn launch(&mut self, args: &[&str]) -> Result<(), Errors>;
}

impl<L: Launcher + ?Sized> Launcher for &mut L {
    fn launch(&mut self, args: &[&str]) -> Result<(), Errors> {
        (**self).launch(args)
    }
}

/// Spawns a real child process that inherits stdio and the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, args: &[&str]) -> Result<(), Errors> {
        let Some((program, rest)) = args.split_first() else {
            return Ok(());
        };

        debug!(program, args = ?rest, "spawning");
        let mut child = Command::new(program)
            .args(rest)
            .spawn()
            .map_err(|source| Errors::Spawn {
                program: program.to_string(),
                source,
            })?;

        debug!(program, pid = child.id(), "running");
        let status = wait_for_termination(&mut child).map_err(|source| Errors::Wait {
            program: program.to_string(),
            source,
        })?;
        debug!(program, %status, "collected");

        match terminating_signal(status) {
            Some(signal) => Err(Errors::Terminated {
                program: program.to_string(),
                signal,
            }),
            None => Ok(()),
        }
    }
}

/// Blocks until the child exited or was killed.
///
/// A stopped child is not finished, neither is an interrupted wait.
fn wait_for_termination(child: &mut Child) -> std::io::Result<ExitStatus> {
    loop {
        match child.wait() {
            Ok(status) if is_terminal(status) => return Ok(status),
            Ok(status) => trace!(%status, "child has not terminated yet"),
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
}

#[cfg(unix)]
fn is_terminal(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.code().is_some() || status.signal().is_some()
}

#[cfg(not(unix))]
fn is_terminal(_status: ExitStatus) -> bool {
    true
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

#[cfg(all(test, unix))]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn empty_vector_spawns_nothing() {
        assert!(ProcessLauncher.launch(&[]).is_ok());
    }

    #[test]
    fn runs_program_from_path() {
        assert!(ProcessLauncher.launch(&["true"]).is_ok());
    }

    #[test]
    fn non_zero_exit_is_not_an_error() {
        assert!(ProcessLauncher.launch(&["sh", "-c", "exit 3"]).is_ok());
    }

    #[test]
    fn passes_every_argument() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("argv");
        let script = format!("printf '%s|' \"$@\" > {}", out.display());

        ProcessLauncher
            .launch(&["sh", "-c", script.as_str(), "sh", "one", "two words", "3"])
            .unwrap();

        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(written, "one|two words|3|");
    }

    #[test]
    fn missing_program_is_reported() {
        let err = ProcessLauncher
            .launch(&["kpsh-definitely-not-a-program"])
            .unwrap_err();

        match err {
            Errors::Spawn { program, source } => {
                assert_eq!(program, "kpsh-definitely-not-a-program");
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn killed_child_is_reported() {
        let err = ProcessLauncher
            .launch(&["sh", "-c", "kill -9 $$"])
            .unwrap_err();

        match err {
            Errors::Terminated { program, signal } => {
                assert_eq!(program, "sh");
                assert_eq!(signal, 9);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn stopped_child_is_waited_for() {
        // the child stops itself, so only the continue from its sibling lets it finish
        let script = "(sleep 0.2; kill -CONT $$) & kill -STOP $$; exit 4";
        assert!(ProcessLauncher.launch(&["sh", "-c", script]).is_ok());
    }
}
