use std::io::{self, Write};

use har_data::{DatasetSummary, SplitSummary};

/// Writes a plain-text summary of the loaded dataset.
pub fn write_report<W: Write>(out: &mut W, summary: &DatasetSummary) -> io::Result<()> {
    writeln!(
        out,
        "Loaded {} features and {} activity labels",
        summary.feature_count, summary.activity_count
    )?;
    for split in summary.splits() {
        write_split(out, split)?;
    }
    Ok(())
}

fn write_split<W: Write>(out: &mut W, split: &SplitSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}] {} samples x {} features",
        split.split, split.samples, split.features
    )?;
    if split.feature_rows != split.samples {
        writeln!(
            out,
            "  warning: {} feature rows for {} labels",
            split.feature_rows, split.samples
        )?;
    }
    for count in &split.activities {
        writeln!(
            out,
            "  {:>2} {:<20} {:>6}  ({})",
            count.id, count.activity, count.count, count.binary
        )?;
    }
    if split.unmapped > 0 {
        writeln!(out, "     {:<20} {:>6}", "<unmapped>", split.unmapped)?;
    }
    writeln!(
        out,
        "  active {} / inactive {} ({:.1}% active)",
        split.active,
        split.inactive,
        split.active_fraction() * 100.0
    )
}
