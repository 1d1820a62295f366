use std::path::PathBuf;

/// Whether the loop keeps prompting after a dispatch.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(thiserror::Error, Debug)]
pub enum Errors {
    #[error("expected argument to \"{0}\"")]
    MissingArgument(&'static str),
    #[error("{}: {source}", .path.display())]
    ChangeDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program}: waiting for the child failed: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
    #[error("{program}: terminated by signal {signal}")]
    Terminated { program: String, signal: i32 },
    #[error("Io Error <{0}>")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtins {
    Cd,
    Help,
    Exit,
}

impl Builtins {
    pub fn supported() -> [(&'static str, Builtins); 3] {
        [
            ("cd", Builtins::Cd),
            ("help", Builtins::Help),
            ("exit", Builtins::Exit),
        ]
    }

    pub fn run(
        self,
        registry: &Registry,
        args: &[&str],
        stdout: &mut dyn std::io::Write,
    ) -> Result<Flow, Errors> {
        match self {
            Builtins::Cd => cd::run(args),
            Builtins::Help => help::run(registry, stdout),
            Builtins::Exit => Ok(Flow::Stop),
        }
    }
}

/// Ordered table of builtin names.
///
/// Lookup is an exact match and the first entry wins. The order is only
/// visible through `help`.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<(&'static str, Builtins)>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Builtins::supported())
    }
}

impl Registry {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, Builtins)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Builtins> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, builtin)| *builtin)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

mod cd {
    use super::{Errors, Flow};

    pub fn run(args: &[&str]) -> Result<Flow, Errors> {
        let Some(path) = args.get(1) else {
            return Err(Errors::MissingArgument("cd"));
        };

        std::env::set_current_dir(path).map_err(|source| Errors::ChangeDirectory {
            path: path.into(),
            source,
        })?;
        tracing::debug!(path = %path, "changed working directory");

        Ok(Flow::Continue)
    }
}

mod help {
    use super::{Errors, Flow, Registry};

    pub fn run(registry: &Registry, stdout: &mut dyn std::io::Write) -> Result<Flow, Errors> {
        writeln!(stdout, "KPSH")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;

        for name in registry.names() {
            writeln!(stdout, "  {}", name)?;
        }

        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Flow::Continue)
    }
}
