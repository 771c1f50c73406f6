use std::io::Write;

use tx_replay::ReplayOutcome;

/// Renders a replay outcome the way the CLI prints it on stdout.
///
/// A decoded response prints the hex remainder and then the decoded text, one per line. A caught
/// failure prints the error and, when the node returned revert data, the decoded reason or the
/// raw data. An unknown transaction prints nothing.
pub fn print_outcome(outcome: &ReplayOutcome, out: &mut impl Write) -> std::io::Result<()> {
    match outcome {
        ReplayOutcome::NotFound => {}
        ReplayOutcome::Decoded(decoded) => {
            writeln!(out, "{}", decoded.remainder)?;
            writeln!(out, "{}", decoded.text)?;
        }
        ReplayOutcome::Failed(failure) => {
            writeln!(out, "Error: {}", failure.error)?;
            match (&failure.revert_reason, &failure.revert_data) {
                (Some(reason), _) => writeln!(out, "Revert reason: {reason}")?,
                (None, Some(data)) => writeln!(out, "Revert data: {data}")?,
                (None, None) => {}
            }
        }
    }
    out.flush()
}
