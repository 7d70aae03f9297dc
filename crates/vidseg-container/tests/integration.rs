//! Integration tests for vidseg-container

use tempfile::tempdir;
use vidseg_container::{ContainerReader, ContainerWriter, Error};

fn write_container(path: &std::path::Path, frames: &[(Vec<u8>, i64)]) {
    let mut writer = ContainerWriter::create(path).unwrap();
    for (payload, ts) in frames {
        writer.write_frame(payload, *ts).unwrap();
    }
    writer.finalize().unwrap();
}

fn sample_frames(n: usize) -> Vec<(Vec<u8>, i64)> {
    (0..n)
        .map(|i| {
            let payload: Vec<u8> = (0..(i * 7 + 1)).map(|b| (b * 31 + i) as u8).collect();
            (payload, i as i64 * 40 - 5)
        })
        .collect()
}

/// Three small payloads with 33ms spacing.
#[test]
fn test_three_frame_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.seg");
    write_container(
        &path,
        &[
            (b"a".to_vec(), 0),
            (b"bb".to_vec(), 33),
            (b"ccc".to_vec(), 66),
        ],
    );

    let mut reader = ContainerReader::open(&path).unwrap();
    assert_eq!(reader.frame_count(), 3);
    assert_eq!(reader.timestamps(), &[0, 33, 66]);
    assert_eq!(reader.read_frame_at(1).unwrap(), b"bb");
}

#[test]
fn test_round_trip_various_counts() {
    let dir = tempdir().unwrap();
    for n in [0usize, 1, 2, 17] {
        let path = dir.path().join(format!("rt_{n}.seg"));
        let frames = sample_frames(n);
        write_container(&path, &frames);

        let mut reader = ContainerReader::open(&path).unwrap();
        assert_eq!(reader.frame_count(), n);
        let expected_ts: Vec<i64> = frames.iter().map(|(_, ts)| *ts).collect();
        assert_eq!(reader.timestamps(), expected_ts.as_slice());

        for (payload, _) in &frames {
            let size = reader.read_frame_size().unwrap();
            assert_eq!(size as usize, payload.len());
            let mut buf = vec![0u8; size as usize];
            reader.read_frame(&mut buf).unwrap();
            assert_eq!(&buf, payload);
        }
        assert!(matches!(
            reader.read_frame_size(),
            Err(Error::EndOfFrames { .. })
        ));
        reader.close();
    }
}

#[test]
fn test_random_access_matches_sequential() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("random.seg");
    let frames = sample_frames(9);
    write_container(&path, &frames);

    let mut reader = ContainerReader::open(&path).unwrap();
    let sequential: Vec<Vec<u8>> = (0..frames.len())
        .map(|_| reader.read_next().unwrap())
        .collect();

    for i in [8usize, 0, 4, 4, 7, 1] {
        reader.seek_to_frame(i).unwrap();
        let size = reader.read_frame_size().unwrap() as usize;
        let mut buf = vec![0u8; size];
        reader.read_frame(&mut buf).unwrap();
        assert_eq!(buf, sequential[i]);
    }
}

#[test]
fn test_read_raw_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.seg");
    let frames = sample_frames(5);
    write_container(&path, &frames);

    let mut reader = ContainerReader::open(&path).unwrap();
    let batch = reader.read_raw_batch([3, 1, 4]).unwrap();
    let indices: Vec<usize> = batch.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![3, 1, 4]);
    for (i, payload) in batch {
        assert_eq!(payload, frames[i].0);
    }

    assert!(matches!(
        reader.read_raw_batch([0, 5]),
        Err(Error::FrameIndexOutOfRange { index: 5, count: 5 })
    ));
}

#[test]
fn test_flush_and_reopen_splits_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("part0.seg");
    let second = dir.path().join("part1.seg");

    let mut writer = ContainerWriter::create(&first).unwrap();
    writer.write_frame(b"one", 10).unwrap();
    writer.write_frame(b"two", 20).unwrap();
    writer.flush_and_reopen(&second).unwrap();
    assert_eq!(writer.frame_count(), 0);
    writer.write_frame(b"three", 30).unwrap();
    writer.finalize().unwrap();

    let mut reader = ContainerReader::open(&first).unwrap();
    assert_eq!(reader.frame_count(), 2);
    assert_eq!(reader.timestamps(), &[10, 20]);
    assert_eq!(reader.read_frame_at(1).unwrap(), b"two");

    let mut reader = ContainerReader::open(&second).unwrap();
    assert_eq!(reader.frame_count(), 1);
    assert_eq!(reader.timestamps(), &[30]);
    assert_eq!(reader.read_frame_at(0).unwrap(), b"three");
}

#[test]
fn test_failed_reopen_keeps_current_file() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("part0.seg");

    let mut writer = ContainerWriter::create(&first).unwrap();
    writer.write_frame(b"one", 10).unwrap();
    writer.write_frame(b"two", 20).unwrap();
    let result = writer.flush_and_reopen(dir.path().join("no/such/dir.seg"));
    assert!(matches!(result, Err(Error::Io(_))));

    assert_eq!(writer.frame_count(), 2);
    writer.write_frame(b"three", 30).unwrap();
    writer.finalize().unwrap();

    let mut reader = ContainerReader::open(&first).unwrap();
    assert_eq!(reader.timestamps(), &[10, 20, 30]);
    assert_eq!(reader.read_frame_at(0).unwrap(), b"one");
    assert_eq!(reader.read_frame_at(2).unwrap(), b"three");
}

#[test]
fn test_open_missing_file() {
    let dir = tempdir().unwrap();
    let result = ContainerReader::open(dir.path().join("missing.seg"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_create_in_missing_directory() {
    let dir = tempdir().unwrap();
    let result = ContainerWriter::create(dir.path().join("no/such/dir/out.seg"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_truncated_footer_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("truncated.seg");
    write_container(&path, &sample_frames(3));

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 8]).unwrap();

    assert!(matches!(
        ContainerReader::open(&path),
        Err(Error::Protocol(_))
    ));
}
