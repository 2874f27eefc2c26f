//! Per-step CSV trace of an annealing run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Appends one CSV record per attempted move to a trace file.
///
/// The file is created (truncating any previous trace) and the header is
/// written once when the run starts. The buffered writer is flushed by
/// [`finish`](TraceWriter::finish) on clean completion and by `Drop` on
/// every other exit path, including panics from problem hooks.
pub(crate) struct TraceWriter {
    out: BufWriter<File>,
}

impl TraceWriter {
    pub(crate) fn create(path: &Path) -> io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "step,temp,energy,new_energy,best_energy,accepted")?;
        Ok(Self { out })
    }

    /// Records one attempted move. `energy` is the last accepted energy,
    /// `new_energy` the energy after the move (before any restore).
    pub(crate) fn record(
        &mut self,
        step: usize,
        temp: f64,
        energy: f64,
        new_energy: f64,
        best_energy: f64,
        accepted: bool,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "{step},{temp:.4},{energy:.3},{new_energy:.3},{best_energy:.2},{}",
            accepted as u8
        )
    }

    pub(crate) fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");

        let mut trace = TraceWriter::create(&path).unwrap();
        trace.record(1, 10.0, 64.0, 49.0, 64.0, true).unwrap();
        trace.record(2, 9.1234567, 49.0, 50.5, 49.0, false).unwrap();
        trace.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "step,temp,energy,new_energy,best_energy,accepted");
        assert_eq!(lines[1], "1,10.0000,64.000,49.000,64.00,1");
        assert_eq!(lines[2], "2,9.1235,49.000,50.500,49.00,0");
    }

    #[test]
    fn test_trace_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");

        let mut trace = TraceWriter::create(&path).unwrap();
        trace.record(1, 1.0, 0.0, 1.0, 0.0, false).unwrap();
        trace.finish().unwrap();

        let trace = TraceWriter::create(&path).unwrap();
        trace.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().collect::<Vec<_>>(),
            vec!["step,temp,energy,new_energy,best_energy,accepted"]
        );
    }

    #[test]
    fn test_trace_create_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("trace.csv");
        assert!(TraceWriter::create(&path).is_err());
    }
}
