use std::io::{self, BufRead, Write};

/// Copies `reader` to `out` one line at a time until end of stream.
///
/// Bytes are passed through untouched, and `out` is flushed after each line
/// so the child's output shows up as soon as it is produced. A trailing
/// partial line (no final newline) is relayed as well. Returns the number of
/// lines relayed.
pub fn relay_lines<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<usize> {
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        out.write_all(&line)?;
        out.flush()?;
        count += 1;
    }

    Ok(count)
}
