use std::{collections::TryReserveError, ops::Deref};

/// Slots added to the argument vector every time it runs full.
pub const ARGS_CHUNK: usize = 64;

/// Characters that separate two arguments. Runs of them collapse.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\n', '\r', '\u{07}'];

#[derive(Clone, Copy, Debug)]
enum Character {
    Delimiter,
    Other,
}

impl Character {
    fn map(c: char) -> Self {
        if DELIMITERS.contains(&c) {
            Self::Delimiter
        } else {
            Self::Other
        }
    }
}

/// The argument vector of one command line.
///
/// Every entry borrows from the line it was split from, so the vector can
/// not outlive that line. The end of the slice is the end marker: an empty
/// vector has no first element.
#[derive(Debug, Default)]
pub struct Args<'line> {
    tokens: Vec<&'line str>,
}

impl<'line> Args<'line> {
    fn with_chunk() -> Result<Self, TryReserveError> {
        let mut tokens = Vec::new();
        tokens.try_reserve_exact(ARGS_CHUNK)?;
        Ok(Self { tokens })
    }

    fn push(&mut self, token: &'line str) -> Result<(), TryReserveError> {
        if self.tokens.len() == self.tokens.capacity() {
            self.tokens.try_reserve_exact(ARGS_CHUNK)?;
        }
        self.tokens.push(token);
        Ok(())
    }
}

impl<'line> Deref for Args<'line> {
    type Target = [&'line str];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

/// Splits `line` on runs of [`DELIMITERS`].
///
/// Leading and trailing delimiters never produce empty tokens. Failing to
/// grow the vector is reported to the caller, which treats it as fatal.
pub fn split(line: &str) -> Result<Args<'_>, TryReserveError> {
    let mut args = Args::with_chunk()?;

    let mut current_block = Character::Delimiter;
    let mut last_idx = 0;

    for (idx, c) in line.char_indices() {
        match (current_block, Character::map(c)) {
            (Character::Delimiter, Character::Other) => {
                // case: _X <-
                current_block = Character::Other;
                last_idx = idx;
            }
            (Character::Other, Character::Delimiter) => {
                // case: X_ <-
                args.push(&line[last_idx..idx])?;
                current_block = Character::Delimiter;
            }
            (Character::Delimiter, Character::Delimiter) => {}
            (Character::Other, Character::Other) => {
                // case: XX <-
            }
        }
    }

    if let Character::Other = current_block {
        args.push(&line[last_idx..])?;
    }

    Ok(args)
}

#[cfg(test)]
mod test {
    use super::*;

    use itertools::Itertools as _;
    use pretty_assertions::assert_eq;

    fn tokens(line: &str) -> Vec<&str> {
        split(line).expect("small vectors always allocate").to_vec()
    }

    #[test]
    fn simple() {
        assert_eq!(tokens("foo"), ["foo"]);
    }

    #[test]
    fn collapses_runs() {
        assert_eq!(tokens("ls   -la  /tmp"), ["ls", "-la", "/tmp"]);
    }

    #[test]
    fn leading_and_trailing_delimiters() {
        assert_eq!(tokens("  \t echo hi \r\n"), ["echo", "hi"]);
    }

    #[test]
    fn every_delimiter_separates() {
        assert_eq!(tokens("a b\tc\nd\re\u{07}f"), ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn blank_line_has_no_program() {
        for line in ["", "   ", "\t\r\n\u{07} "] {
            let args = split(line).expect("small vectors always allocate");
            assert!(args.is_empty());
            assert_eq!(args.first(), None);
        }
    }

    #[test]
    fn quotes_are_plain_characters() {
        assert_eq!(tokens("echo 'a b'"), ["echo", "'a", "b'"]);
    }

    #[test]
    fn multibyte_tokens() {
        assert_eq!(tokens("grüße  ñandú"), ["grüße", "ñandú"]);
    }

    #[test]
    fn tokens_borrow_from_the_line() {
        let line = String::from("cat file");
        let args = split(&line).expect("small vectors always allocate");
        let range = line.as_bytes().as_ptr_range();
        for token in args.iter() {
            assert!(range.contains(&token.as_ptr()));
        }
    }

    #[test]
    fn grows_past_one_chunk() {
        let count = ARGS_CHUNK * 2 + 3;
        let line = (0..count).map(|i| format!("t{i}")).join(" ");

        let args = split(&line).expect("growth succeeds");

        assert_eq!(args.len(), count);
        assert_eq!(args[0], "t0");
        assert_eq!(args[count - 1], format!("t{}", count - 1));
    }
}
