use std::io::Cursor;

use linebuf::{BufferedLineReader, ReaderState};
use quickcheck::QuickCheck;

const TESTS: u64 = 1_000;

/// Inputs biased towards line endings, so `\r\n` pairs show up often.
fn to_input(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .map(|b| match b % 6 {
            0 => b'\r',
            1 => b'\n',
            _ => b'a' + (b % 26),
        })
        .collect()
}

/// Capacities between the minimum (2) and 33.
fn to_capacity(raw: u8) -> usize {
    2 + usize::from(raw % 32)
}

fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'\r' && input.get(i + 1) == Some(&b'\n') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(input[i]);
            i += 1;
        }
    }
    out
}

/// Property: Fetching everything yields the input with each `\r\n` collapsed
/// to `\n`, regardless of buffer capacity.
#[test]
fn fetch_normalizes_for_any_capacity() {
    fn prop(raw: Vec<u8>, capacity: u8) -> bool {
        let input = to_input(&raw);
        let mut reader =
            BufferedLineReader::with_capacity(to_capacity(capacity), Cursor::new(&input)).unwrap();

        let mut out = Vec::new();
        while let Some(byte) = reader.fetch().unwrap() {
            out.push(byte);
        }
        out == normalize(&input)
    }

    QuickCheck::new()
        .tests(TESTS)
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

/// Property: The line number always equals the number of `\n` fetched so far.
#[test]
fn line_number_counts_fetched_newlines() {
    fn prop(raw: Vec<u8>, capacity: u8) -> bool {
        let input = to_input(&raw);
        let mut reader =
            BufferedLineReader::with_capacity(to_capacity(capacity), Cursor::new(&input)).unwrap();

        let mut newlines = 0;
        while let Some(byte) = reader.fetch().unwrap() {
            if byte == b'\n' {
                newlines += 1;
            }
            if reader.line_number() != newlines {
                return false;
            }
        }
        reader.line_number() == normalize(&input).iter().filter(|&&b| b == b'\n').count()
    }

    QuickCheck::new()
        .tests(TESTS)
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

/// Property: Repeated peeks agree with each other and with the following fetch.
#[test]
fn peek_is_stable_and_matches_fetch() {
    fn prop(raw: Vec<u8>, capacity: u8) -> bool {
        let input = to_input(&raw);
        let mut reader =
            BufferedLineReader::with_capacity(to_capacity(capacity), Cursor::new(&input)).unwrap();

        loop {
            let first = reader.peek().unwrap();
            let cursor = reader.inspect().read_cursor;
            if reader.peek().unwrap() != first || reader.inspect().read_cursor != cursor {
                return false;
            }

            let fetched = reader.fetch().unwrap();
            match (first, fetched) {
                (Some(p), Some(f)) if p == f || (p == b'\r' && f == b'\n') => {}
                // Peek gives up one byte early at the very end
                (None, Some(_)) => return reader.fetch().unwrap().is_none(),
                (None, None) => return true,
                _ => return false,
            }
        }
    }

    QuickCheck::new()
        .tests(TESTS)
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

/// Property: After the first `None` from fetch, fetch and peek stay at `None`.
#[test]
fn end_of_stream_is_terminal() {
    fn prop(raw: Vec<u8>, capacity: u8, extra_calls: u8) -> bool {
        let input = to_input(&raw);
        let mut reader =
            BufferedLineReader::with_capacity(to_capacity(capacity), Cursor::new(&input)).unwrap();

        while reader.fetch().unwrap().is_some() {}

        (0..=extra_calls % 8).all(|_| {
            reader.fetch().unwrap().is_none()
                && reader.peek().unwrap().is_none()
                && reader.state() == ReaderState::Exhausted
        })
    }

    QuickCheck::new()
        .tests(TESTS)
        .quickcheck(prop as fn(Vec<u8>, u8, u8) -> bool);
}

/// Property: Skipping a line always lands right after the next `\n`.
#[test]
fn skip_to_line_end_lands_after_newline() {
    fn prop(raw: Vec<u8>, capacity: u8) -> bool {
        let input = to_input(&raw);
        let expected = normalize(&input);
        let mut reader =
            BufferedLineReader::with_capacity(to_capacity(capacity), Cursor::new(&input)).unwrap();

        reader.skip_to_line_end().unwrap();
        let rest_start = match expected.iter().position(|&b| b == b'\n') {
            Some(i) => i + 1,
            None => expected.len(),
        };

        let mut rest = Vec::new();
        while let Some(byte) = reader.fetch().unwrap() {
            rest.push(byte);
        }
        rest == expected[rest_start..]
    }

    QuickCheck::new()
        .tests(TESTS)
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}
