use crate::builtin::Registry;

pub const PROGRAM_NAME: &str = "kpsh";
pub const PROMPT: &str = "> ";

/// Everything the shell needs to know at startup. Never changes afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix of every diagnostic on stderr.
    pub name: &'static str,
    pub prompt: &'static str,
    pub builtins: Registry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: PROGRAM_NAME,
            prompt: PROMPT,
            builtins: Registry::default(),
        }
    }
}
