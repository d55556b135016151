//! Profile input loop: prompt, parse, warn and ask again until a line parses.

use std::io::{self, BufRead, Write};

use shape_core::{parse_line, Profile, ProfileError};
use tracing::debug;

use crate::report;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input closed before a complete profile was entered")]
    Closed,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Warning shown for a rejected line.
pub fn warning(err: &ProfileError) -> &'static str {
    match err {
        ProfileError::MissingField { .. } => "PLEASE FILL IN ALL THE DATA TO PROCEED!",
        ProfileError::InvalidNumber { .. }
        | ProfileError::InvalidGender { .. }
        | ProfileError::TrailingToken { .. } => "INVALID VALUE!",
    }
}

/// Read lines until one parses into a profile. There is no attempt limit; only end of
/// input stops the loop without a profile.
pub fn read_profile<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Profile, InputError> {
    loop {
        report::column_labels(out)?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        writeln!(out)?;

        match parse_line(&line) {
            Ok(profile) => return Ok(profile),
            Err(e) => {
                debug!("rejected input: {e}");
                writeln!(out)?;
                writeln!(out, "{}", warning(&e))?;
                writeln!(out)?;
                report::input_header(out)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_core::Gender;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<Profile, InputError>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = read_profile(&mut input, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn first_good_line_wins() {
        let (res, out) = run("1.70 70.0 M 3 20\n1.50 50 F 1 30\n");
        let p = res.unwrap();
        assert_eq!(p.height, 1.70);
        assert_eq!(p.gender, Gender::Male);
        assert!(!out.contains("INVALID"));
        assert!(!out.contains("PLEASE FILL"));
    }

    #[test]
    fn retries_until_complete() {
        let (res, out) = run("1.70\n\n1.70 70.0 M\n1.70 70.0 M 3\n1.70 70.0 M 3 20\n");
        let p = res.unwrap();
        assert_eq!(p.age, 20);
        assert_eq!(out.matches("PLEASE FILL IN ALL THE DATA TO PROCEED!").count(), 4);
    }

    #[test]
    fn invalid_value_then_recovery() {
        let (res, out) = run("1.70 seventy M 3 20\n1.70 70.0 X 3 20\n1.62 58 f 2 35\n");
        let p = res.unwrap();
        assert_eq!(p.gender, Gender::Female);
        assert_eq!(out.matches("INVALID VALUE!").count(), 2);
        assert_eq!(out.matches("NOTE: Activity level").count(), 2);
    }

    #[test]
    fn malformed_or_trailing_token_is_invalid_value() {
        let (res, out) = run("abc 70\n1.70 70.0 M 3 20 abc\n1.70 70.0 M 3 20\n");
        assert_eq!(res.unwrap().age, 20);
        assert_eq!(out.matches("INVALID VALUE!").count(), 2);
        assert!(!out.contains("PLEASE FILL"));
    }

    #[test]
    fn end_of_input_stops_loop() {
        let (res, out) = run("1.70 70.0\n");
        assert!(matches!(res, Err(InputError::Closed)));
        assert_eq!(out.matches("PLEASE FILL").count(), 1);
    }
}
