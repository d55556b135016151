//! Post-response menu loop.

use std::io::{self, BufRead, Write};

use shape_core::HealthReport;

use crate::report;

/// Menu entry picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Imc,
    Bmr,
    CalorieIntake,
    Exit,
}

impl Choice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Choice::Imc),
            "2" => Some(Choice::Bmr),
            "3" => Some(Choice::CalorieIntake),
            "4" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Show reports until the user picks Exit or input ends. Unknown options re-prompt.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W, report: &HealthReport) -> io::Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out)?;
        writeln!(out, "=> Select an option: ")?;
        writeln!(out)?;
        write!(
            out,
            "{:^16}{:^18}{:^18}{:^18}\t",
            "1 - IMC", "2 - BMR", "3 - Calorie Intake", "4 - EXIT"
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out)?;

        match Choice::parse(&line) {
            Some(Choice::Imc) => report::imc(out, report)?,
            Some(Choice::Bmr) => report::bmr(out, report)?,
            Some(Choice::CalorieIntake) => report::calorie_intake(out, report)?,
            Some(Choice::Exit) => return report::farewell(out),
            None => writeln!(out, "Error: Invalid option!")?,
        }
    }
}
