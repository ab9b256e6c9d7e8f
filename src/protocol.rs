//! Token-stream interpreter behind the `osavl` binary.
//!
//! Input is a sequence of whitespace-separated tokens. A mode token selects
//! the next command and must be followed by exactly one number:
//!
//! | Mode | Number      | Effect                                              |
//! |------|-------------|-----------------------------------------------------|
//! | `k`  | `i64` key   | insert the key; a duplicate is an error             |
//! | `m`  | `usize` k   | print the k-th smallest key (1-based) and a space   |
//! | `n`  | `i64` key   | print the count of keys smaller than it and a space |
//!
//! A successful run ends with a newline. The first malformed token stops the
//! run with a [`CommandError`]. Numbers are parsed whole: `12abc` and a
//! negative rank are invalid integers, not truncated or wrapped.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use std::str;

use osavl::OSAvlSet;
use tracing::{debug, trace};

/// Command selected by a mode token, waiting for its number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Insert,
    Select,
    Rank,
}

impl Mode {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "k" => Some(Mode::Insert),
            "m" => Some(Mode::Select),
            "n" => Some(Mode::Rank),
            _ => None,
        }
    }
}

/// Reasons the interpreter stops.
///
/// `Display` renders the exact line the binary prints to stdout, without the
/// trailing newline.
#[derive(Debug)]
pub enum CommandError {
    /// A mode token arrived while a number was expected.
    NumberExpected,
    /// A number arrived with no mode token before it.
    ModeExpected,
    /// The number token is not an integer.
    InvalidInteger,
    /// A key does not fit in `i64`.
    KeyOutOfRange,
    /// A rank does not fit in `usize`.
    IndexOutOfRange,
    /// The key is already in the set.
    Duplicate(i64),
    /// The rank is 0 or greater than the number of keys.
    WrongIndex(usize),
    /// The input ended while a number was expected.
    MissingNumber,
    /// Reading input or writing output failed.
    Io(io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NumberExpected => f.write_str("NO number followed. Error."),
            CommandError::ModeExpected => f.write_str("NO k/m/n followed. Error."),
            CommandError::InvalidInteger => f.write_str("Invalid integer argument. Error."),
            CommandError::KeyOutOfRange => f.write_str("Value out of long long range. Error."),
            CommandError::IndexOutOfRange => f.write_str("Value out of size_t range. Error."),
            CommandError::Duplicate(_) => f.write_str("You entered a duplicate. Error. "),
            CommandError::WrongIndex(_) => f.write_str("Wrong index for k-th order statistic. Error. "),
            CommandError::MissingNumber => f.write_str("Input ended without a following number. Error. "),
            CommandError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Io(err)
    }
}

/// Interprets a token stream against one set of `i64` keys.
#[derive(Debug, Default)]
pub struct Interpreter {
    set: OSAvlSet<i64>,
    pending: Option<Mode>,
}

impl Interpreter {
    /// Consumes one token, writing any command output to `out`.
    pub fn feed<W: Write>(&mut self, token: &str, out: &mut W) -> Result<(), CommandError> {
        match (self.pending, Mode::from_token(token)) {
            (None, Some(mode)) => self.pending = Some(mode),
            (Some(_), Some(_)) => return Err(CommandError::NumberExpected),
            (None, None) => return Err(CommandError::ModeExpected),
            (Some(mode), None) => {
                self.execute(mode, token, out)?;
                self.pending = None;
            }
        }
        Ok(())
    }

    /// Consumes one raw token. Bytes that are not UTF-8 form neither a mode
    /// nor a number.
    pub fn feed_bytes<W: Write>(&mut self, token: &[u8], out: &mut W) -> Result<(), CommandError> {
        match str::from_utf8(token) {
            Ok(token) => self.feed(token, out),
            Err(_) if self.pending.is_some() => Err(CommandError::InvalidInteger),
            Err(_) => Err(CommandError::ModeExpected),
        }
    }

    /// Ends the stream: fails if a number is still expected, otherwise writes
    /// the closing newline.
    pub fn finish<W: Write>(self, out: &mut W) -> Result<(), CommandError> {
        if self.pending.is_some() {
            return Err(CommandError::MissingNumber);
        }
        debug!(len = self.set.len(), "input finished");
        writeln!(out)?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, mode: Mode, token: &str, out: &mut W) -> Result<(), CommandError> {
        trace!(?mode, token, "executing");
        match mode {
            Mode::Insert => {
                let key = parse_key(token)?;
                if !self.set.insert(key) {
                    return Err(CommandError::Duplicate(key));
                }
                debug_assert!(
                    within_height_bound(self.set.len(), self.set.height()),
                    "height {} exceeds the AVL bound for {} keys",
                    self.set.height(),
                    self.set.len()
                );
            }
            Mode::Select => {
                let index = parse_index(token)?;
                let key = self.set.select_by_rank1(index).get().ok_or(CommandError::WrongIndex(index))?;
                write!(out, "{key} ")?;
            }
            Mode::Rank => {
                let key = parse_key(token)?;
                write!(out, "{} ", self.set.rank_of0(&key))?;
            }
        }
        Ok(())
    }
}

/// Runs the whole protocol over `input`, writing results to `output`.
pub fn run<R: BufRead, W: Write>(mut input: R, output: &mut W) -> Result<(), CommandError> {
    let mut interpreter = Interpreter::default();
    let mut line = Vec::new();
    while input.read_until(b'\n', &mut line)? != 0 {
        for token in line.split(|&byte| is_separator(byte)).filter(|token| !token.is_empty()) {
            interpreter.feed_bytes(token, output)?;
        }
        line.clear();
    }
    interpreter.finish(output)
}

/// ASCII whitespace as the C locale defines it, vertical tab included.
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

fn parse_key(token: &str) -> Result<i64, CommandError> {
    token.parse().map_err(|err| classify(&err, CommandError::KeyOutOfRange))
}

fn parse_index(token: &str) -> Result<usize, CommandError> {
    token.parse().map_err(|err| classify(&err, CommandError::IndexOutOfRange))
}

fn classify(err: &ParseIntError, overflow: CommandError) -> CommandError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => overflow,
        _ => CommandError::InvalidInteger,
    }
}

/// Whether an AVL tree of `len` keys may have `height` levels:
/// `height <= log_phi(sqrt(5) * (len + 1 + sqrt(5) / 2)) - 2`.
#[allow(clippy::cast_precision_loss)]
pub fn within_height_bound(len: usize, height: usize) -> bool {
    let sqrt5 = 5f64.sqrt();
    let phi = (1.0 + sqrt5) / 2.0;
    let max_height = (sqrt5 * (len as f64 + 1.0 + sqrt5 / 2.0)).ln() / phi.ln() - 2.0;
    height as f64 <= max_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Runs `input` and returns stdout as the binary would print it.
    fn transcript(input: &str) -> (String, bool) {
        let mut out = Vec::new();
        let result = run(input.as_bytes(), &mut out);
        let ok = result.is_ok();
        if let Err(err) = result {
            writeln!(out, "{err}").unwrap();
        }
        (String::from_utf8(out).unwrap(), ok)
    }

    #[test]
    fn inserts_selects_and_ranks() {
        let (out, ok) = transcript("k 5 k 3 k 8 k 1 k 4 k 7 k 9\nm 1 m 4 m 7 n 6 n 0 n 100\n");
        assert!(ok);
        assert_eq!(out, "1 5 9 4 0 7 \n");
    }

    #[test]
    fn empty_input_prints_newline() {
        assert_eq!(transcript(""), ("\n".to_owned(), true));
        assert_eq!(transcript("  \n\t\n"), ("\n".to_owned(), true));
    }

    #[test]
    fn rank_on_empty_set_is_zero() {
        assert_eq!(transcript("n 42"), ("0 \n".to_owned(), true));
    }

    #[test]
    fn select_out_of_range() {
        assert_eq!(
            transcript("k 1 k 2 m 3"),
            ("Wrong index for k-th order statistic. Error. \n".to_owned(), false)
        );
        assert_eq!(
            transcript("k 1 m 0"),
            ("Wrong index for k-th order statistic. Error. \n".to_owned(), false)
        );
        assert_eq!(transcript("m 1"), ("Wrong index for k-th order statistic. Error. \n".to_owned(), false));
    }

    #[test]
    fn output_before_an_error_is_kept() {
        assert_eq!(
            transcript("k 10 m 1 m 2"),
            ("10 Wrong index for k-th order statistic. Error. \n".to_owned(), false)
        );
    }

    #[test]
    fn mode_without_number() {
        assert_eq!(transcript("k m 1"), ("NO number followed. Error.\n".to_owned(), false));
        assert_eq!(transcript("n n"), ("NO number followed. Error.\n".to_owned(), false));
    }

    #[test]
    fn number_without_mode() {
        assert_eq!(transcript("5"), ("NO k/m/n followed. Error.\n".to_owned(), false));
        assert_eq!(transcript("k 1 2"), ("NO k/m/n followed. Error.\n".to_owned(), false));
    }

    #[test]
    fn duplicate_insert() {
        assert_eq!(transcript("k 7 k 7"), ("You entered a duplicate. Error. \n".to_owned(), false));
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(transcript("k abc"), ("Invalid integer argument. Error.\n".to_owned(), false));
        assert_eq!(transcript("k 12abc"), ("Invalid integer argument. Error.\n".to_owned(), false));
        assert_eq!(transcript("m -1"), ("Invalid integer argument. Error.\n".to_owned(), false));
        assert_eq!(transcript("n 1.5"), ("Invalid integer argument. Error.\n".to_owned(), false));
    }

    #[test]
    fn numbers_out_of_range() {
        assert_eq!(
            transcript("k 9223372036854775808"),
            ("Value out of long long range. Error.\n".to_owned(), false)
        );
        assert_eq!(
            transcript("n -9223372036854775809"),
            ("Value out of long long range. Error.\n".to_owned(), false)
        );
        assert_eq!(
            transcript("m 99999999999999999999999"),
            ("Value out of size_t range. Error.\n".to_owned(), false)
        );
    }

    #[test]
    fn extreme_keys_are_accepted() {
        let (out, ok) = transcript("k -9223372036854775808 k 9223372036854775807 m 1 m 2");
        assert!(ok);
        assert_eq!(out, "-9223372036854775808 9223372036854775807 \n");
    }

    #[test]
    fn input_ends_mid_command() {
        assert_eq!(
            transcript("k 1 k"),
            ("Input ended without a following number. Error. \n".to_owned(), false)
        );
    }

    /// Like `transcript`, for input that is not valid UTF-8.
    fn byte_transcript(input: &[u8]) -> (String, bool) {
        let mut out = Vec::new();
        let result = run(input, &mut out);
        let ok = result.is_ok();
        if let Err(err) = result {
            writeln!(out, "{err}").unwrap();
        }
        (String::from_utf8(out).unwrap(), ok)
    }

    #[test]
    fn non_utf8_number_is_an_invalid_integer() {
        assert_eq!(
            byte_transcript(b"k 1 m 1 n \xff 2\n"),
            ("1 Invalid integer argument. Error.\n".to_owned(), false)
        );
        assert_eq!(
            byte_transcript(b"k 5\nk 7 m 2 k 4\xe9\n"),
            ("7 Invalid integer argument. Error.\n".to_owned(), false)
        );
    }

    #[test]
    fn non_utf8_mode_is_rejected_after_earlier_output() {
        assert_eq!(byte_transcript(b"k 1 m 1 \xff\n"), ("1 NO k/m/n followed. Error.\n".to_owned(), false));
    }

    #[test]
    fn separators_follow_ascii_whitespace() {
        assert_eq!(byte_transcript(b"k\x0B3\x0Cm\r1\tn\n9"), ("3 1 \n".to_owned(), true));
        // A non-breaking space is part of the token.
        assert_eq!(
            transcript("k\u{a0}1"),
            ("NO k/m/n followed. Error.\n".to_owned(), false)
        );
    }

    #[test]
    fn errors_carry_their_operand() {
        let mut interpreter = Interpreter::default();
        let mut sink = Vec::new();
        for token in ["k", "3", "k"] {
            interpreter.feed(token, &mut sink).unwrap();
        }
        assert!(matches!(interpreter.feed("3", &mut sink), Err(CommandError::Duplicate(3))));

        let mut interpreter = Interpreter::default();
        interpreter.feed("m", &mut sink).unwrap();
        assert!(matches!(interpreter.feed("4", &mut sink), Err(CommandError::WrongIndex(4))));
    }

    #[test]
    fn height_bound_matches_minimal_avl_trees() {
        // Sparsest AVL trees: 1, 2, 4, 7, 12, 20 keys for heights 1 through 6.
        for (len, height) in [(1, 1), (2, 2), (4, 3), (7, 4), (12, 5), (20, 6)] {
            assert!(within_height_bound(len, height), "{len} keys, height {height}");
        }
        assert!(within_height_bound(0, 0));
        for (len, height) in [(1, 3), (2, 3), (4, 4), (7, 5), (12, 6), (20, 7)] {
            assert!(!within_height_bound(len, height), "{len} keys, height {height}");
        }
    }
}
