//! Keys command: exercise the background key reader.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use pe_term::{KeyReader, KeySource, NO_KEY};

/// Echo keys from `source` until `q` arrives.
pub fn run<S: KeySource, W: Write>(writer: &mut W, source: S, poll_interval: Duration) -> Result<()> {
    let mut reader = KeyReader::start(source, poll_interval)?;
    writeln!(writer, "Reading keys; type q to stop.")?;

    loop {
        match reader.pop_char() {
            NO_KEY => thread::sleep(poll_interval),
            'q' => break,
            '\n' | '\r' => {}
            ch => writeln!(writer, "key: {ch:?}")?,
        }
    }

    reader.stop()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::io;

    struct Scripted(VecDeque<char>);

    impl KeySource for Scripted {
        fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>> {
            let next = self.0.pop_front();
            if next.is_none() {
                thread::sleep(timeout);
            }
            Ok(next)
        }
    }

    #[test]
    fn echoes_until_q() {
        let source = Scripted("ab\nqz".chars().collect());
        let mut output = Vec::new();
        run(&mut output, source, Duration::from_millis(2)).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Reading keys; type q to stop.\nkey: 'a'\nkey: 'b'\n"
        );
    }
}
