//! Behavioural properties of the line buffer, checked through the public API.

use std::fs;

use tempfile::TempDir;
use xvedit_core::{storage, BufferConfig, EditError, TextBuffer};

fn buffer_of(lines: &[&str]) -> TextBuffer {
    let content: String = lines.iter().map(|line| format!("{line}\n")).collect();
    TextBuffer::from_bytes(content.into_bytes(), &BufferConfig::default()).unwrap()
}

fn texts(buffer: &TextBuffer, start: usize, end: usize) -> Vec<String> {
    buffer
        .list(start, end)
        .map(|(_, text)| String::from_utf8_lossy(text).into_owned())
        .collect()
}

#[test]
fn test_replace_then_list_returns_new_text() {
    let mut buffer = buffer_of(&["one", "two", "three"]);
    for line in 1..=3 {
        let text = format!("replacement {line}");
        buffer.replace(line, &text).unwrap();
        assert_eq!(texts(&buffer, line, line), vec![text]);
    }
}

#[test]
fn test_append_adds_exactly_one_last_line() {
    let mut buffer = buffer_of(&["a", "b"]);
    for (i, text) in ["c", "", "long trailing line"].into_iter().enumerate() {
        let before = buffer.num_lines();
        buffer.append(text).unwrap();
        assert_eq!(buffer.num_lines(), before + 1, "append #{i}");
        assert_eq!(buffer.line(buffer.num_lines()), Some(text.as_bytes()));
    }
}

#[test]
fn test_insert_before_shifts_lines_down() {
    let original = ["a", "b", "c", "d"];
    for position in 1..=original.len() + 1 {
        let mut buffer = buffer_of(&original);
        buffer.insert_before(position, "new").unwrap();

        assert_eq!(texts(&buffer, position, position), vec!["new"]);
        for (i, line) in original.iter().enumerate() {
            let old_number = i + 1;
            let new_number = if old_number >= position {
                old_number + 1
            } else {
                old_number
            };
            assert_eq!(buffer.line(new_number), Some(line.as_bytes()));
        }
    }
}

#[test]
fn test_delete_range_removes_inclusive_span() {
    let original = ["1", "2", "3", "4", "5"];
    for start in 1..=5 {
        for end in start..=5 {
            let mut buffer = buffer_of(&original);
            buffer.delete_range(start, end).unwrap();

            assert_eq!(buffer.num_lines(), 5 - (end - start + 1));
            match original.get(end) {
                Some(next) => assert_eq!(buffer.line(start), Some(next.as_bytes())),
                None => assert_eq!(buffer.line(start), None),
            }
        }
    }
}

#[test]
fn test_full_listing_and_clamping() {
    let buffer = buffer_of(&["alpha", "beta", "gamma"]);
    assert_eq!(texts(&buffer, 1, 3), vec!["alpha", "beta", "gamma"]);
    assert_eq!(texts(&buffer, 1, 300), vec!["alpha", "beta", "gamma"]);

    let numbers: Vec<usize> = buffer.list(1, 300).map(|(n, _)| n).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_failed_operations_change_nothing() {
    let mut buffer =
        TextBuffer::from_bytes(b"ab\ncd\n".to_vec(), &BufferConfig::new(4, 2)).unwrap();
    let snapshot = buffer.as_bytes().to_vec();

    let failures = [
        buffer.append("xyz").unwrap_err(),
        buffer.insert_before(4, "x").unwrap_err(),
        buffer.replace(1, "toolong").unwrap_err(),
        buffer.replace(2, "a\nb").unwrap_err(),
        buffer.delete_range(2, 1).unwrap_err(),
        buffer.delete_range(1, 3).unwrap_err(),
    ];

    assert!(failures.iter().all(EditError::is_recoverable));
    assert_eq!(buffer.as_bytes(), snapshot.as_slice());
    assert_eq!(buffer.num_lines(), 2);
    assert!(!buffer.is_dirty());
}

#[test]
fn test_load_save_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let samples: [&[u8]; 4] = [
        b"",
        b"single\n",
        b"\n\n\n",
        b"mixed\r\nline endings\nand a tail",
    ];

    for (i, sample) in samples.iter().enumerate() {
        let path = temp_dir.path().join(format!("sample-{i}.txt"));
        fs::write(&path, sample).unwrap();

        let mut buffer = storage::load(&path, &BufferConfig::default()).unwrap();
        storage::save(&mut buffer, &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), *sample, "sample {i}");
    }
}
