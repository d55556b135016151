//! Plain-text presentation: banners, input header and the three report screens.

use std::io::{self, Write};

use shape_core::engine::{
    KCAL_PER_GRAM_CARBOHYDRATES, KCAL_PER_GRAM_FATS, KCAL_PER_GRAM_PROTEINS,
};
use shape_core::HealthReport;

const WIDTH: usize = 81;
const CELL: usize = 25;

fn row(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "*".repeat(WIDTH))
}

fn table_rule(out: &mut impl Write) -> io::Result<()> {
    let dashes = "-".repeat(CELL);
    writeln!(out, "+{dashes}++{dashes}++{dashes}+")
}

fn table_row(out: &mut impl Write, cells: [&str; 3]) -> io::Result<()> {
    let [a, b, c] = cells;
    writeln!(out, "|{a:^CELL$}||{b:^CELL$}||{c:^CELL$}|")
}

fn centered(out: &mut impl Write, lines: &[&str]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line:^WIDTH$}")?;
    }
    Ok(())
}

fn result_box(out: &mut impl Write, cells: [&str; 3]) -> io::Result<()> {
    writeln!(out)?;
    row(out)?;
    table_row(out, cells)?;
    row(out)
}

pub fn title(out: &mut impl Write, text: &str) -> io::Result<()> {
    row(out)?;
    writeln!(out, "*{text:^width$}*", width = WIDTH - 2)?;
    row(out)
}

/// Activity level note and an example line.
pub fn input_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "NOTE: Activity level ranges from 1 (Sedentary) to 4 (Very Active)!"
    )?;
    writeln!(
        out,
        "Ex: {:^8} {:^22} {:^14} {:^20} {:^10} ",
        "1.70", "70.0", "M", "3", "20"
    )?;
    writeln!(out)
}

/// Field labels printed right above the input line.
pub fn column_labels(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:^16}{:^18}{:^18}{:^18}{:^16}",
        "Height (m):", "Weight (Kg):", "Gender (M/F):", "Activity Level:", "Age:"
    )?;
    out.flush()
}

/// Opening screen shown before the first prompt.
pub fn welcome(out: &mut impl Write) -> io::Result<()> {
    title(out, "The Shape of Us!")?;
    writeln!(out)?;
    writeln!(out, "=> Enter some data to get started: ")?;
    writeln!(out)?;
    input_header(out)
}

pub fn imc(out: &mut impl Write, report: &HealthReport) -> io::Result<()> {
    title(out, "IMC")?;
    writeln!(out)?;
    centered(
        out,
        &[
            "The Body Mass Index (IMC) is a parameter",
            "used to determine if the weight is appropriate for the individual's height,",
            "which can directly impact their health and quality of life!",
        ],
    )?;
    writeln!(out)?;
    let ranges = [
        ["IMC Table", "Range", "Status"],
        ["Less than:", "18.5", "Underweight!"],
        ["Between:", "18.5 and 24.9", "Normal Weight!"],
        ["Between:", "25.0 and 29.9", "Overweight!"],
        ["Between:", "30.0 and 34.9", "Obesity Grade 1!"],
        ["Between:", "35.0 and 39.9", "Obesity Grade 2!"],
        ["Greater than:", "40.0", "Obesity Grade 3!"],
    ];
    for cells in ranges {
        table_rule(out)?;
        table_row(out, cells)?;
    }
    table_rule(out)?;
    let value = format!("{:.2}", report.imc);
    result_box(out, ["YOUR IMC:", &value, report.imc_status.label()])
}

pub fn bmr(out: &mut impl Write, report: &HealthReport) -> io::Result<()> {
    title(out, "Basal Metabolic Rate (BMR): ")?;
    writeln!(out)?;
    centered(
        out,
        &[
            "The Basal Metabolic Rate (BMR) is the minimum amount",
            "of energy (calories) required to sustain vital functions",
            "this rate can vary based on sex, weight, height, age, and activity level.",
        ],
    )?;
    let value = format!("{:.2} kcal", report.bmr);
    result_box(out, ["RESULT:", "YOUR BMR:", &value])
}

pub fn calorie_intake(out: &mut impl Write, report: &HealthReport) -> io::Result<()> {
    title(out, "Calorie Intake: ")?;
    writeln!(out)?;
    centered(
        out,
        &[
            "Calories represent the amount of energy that a given",
            "food provides after being consumed, contributing to essential",
            "bodily functions such as respiration, hormone production, and brain function.",
        ],
    )?;
    writeln!(out)?;
    centered(out, &["You should consume approximately: "])?;
    writeln!(out)?;

    let n = &report.nutrients;
    let macros = [
        ("Carbohydrates:", n.carbohydrates, KCAL_PER_GRAM_CARBOHYDRATES),
        ("Proteins:", n.proteins, KCAL_PER_GRAM_PROTEINS),
        ("Fats:", n.fats, KCAL_PER_GRAM_FATS),
    ];
    for (name, grams, density) in macros {
        let grams_cell = format!("{grams:.2} g");
        let kcal_cell = format!("{:.2} kcal", grams * density);
        table_rule(out)?;
        table_row(out, [name, &grams_cell, &kcal_cell])?;
    }
    table_rule(out)?;

    let value = format!("{:.2} kcal", report.calorie_intake);
    result_box(out, ["RESULT:", "YOUR CALORIE INTAKE:", &value])
}

pub fn farewell(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:^79}", "Thank you for using our App!")?;
    writeln!(out)?;
    writeln!(out)?;
    row(out)
}
