//! Output formatting for repeat records

use crate::scan::RepeatRecord;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How records are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated columns with a header line
    #[default]
    Tsv,
    /// A JSON array of records
    Json,
}

/// Print records to stdout
pub fn print_records(records: &[RepeatRecord], format: OutputFormat, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_records(&mut stdout, records, format)
}

/// Write records in the given format
pub fn write_records<W: WriteColor>(
    out: &mut W,
    records: &[RepeatRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(out, records),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)
        }
    }
}

fn write_tsv<W: WriteColor>(out: &mut W, records: &[RepeatRecord]) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(out, "length\tfirst_arm\tsecond_arm")?;
    out.reset()?;
    writeln!(out)?;

    for r in records {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", r.arm_length)?;
        out.reset()?;
        writeln!(out, "\t{}\t{}", r.first_arm, r.second_arm)?;
    }

    Ok(())
}
