//! Ordered read-ahead for input files.
//!
//! ```text
//! ┌──────────────┐  job indices   ┌──────────────┐
//! │ Merging      │ ─────────────▶ │ Reader       │ x read_concurrency
//! │ thread       │ ◀───────────── │ threads      │
//! └──────────────┘ (index, bytes) └──────────────┘
//! ```
//!
//! Reader threads only load bytes. The merging thread reorders results by
//! index and hands them to the consumer strictly in input order, so all
//! processing and appending happens on one thread. At most `window` files
//! are read ahead of the one being consumed.

use std::collections::BTreeMap;
use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use bytes::Bytes;
use crossbeam_channel::unbounded;
use log::warn;

use crate::input::InputFile;

type ReadResult = io::Result<Bytes>;

/// Read `files` with up to `workers` threads and pass each file's content to
/// `consume` in input order. Stops early when `consume` breaks.
pub(crate) fn read_in_order<F>(files: &[InputFile], workers: usize, mut consume: F)
where
    F: FnMut(usize, ReadResult) -> ControlFlow<()>,
{
    let workers = workers.min(files.len());
    if workers <= 1 {
        read_sequential(files, 0, &mut consume);
        return;
    }

    let window = workers * 2;
    let stopped = AtomicBool::new(false);

    thread::scope(|scope| {
        let (job_tx, job_rx) = unbounded::<usize>();
        let (result_tx, result_rx) = unbounded::<(usize, ReadResult)>();

        let mut spawned = 0;
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let stopped = &stopped;
            let spawn = thread::Builder::new()
                .name(format!("sdfmerge-reader-{}", worker))
                .spawn_scoped(scope, move || {
                    for index in job_rx {
                        if stopped.load(Ordering::Acquire) {
                            break;
                        }
                        if result_tx.send((index, files[index].read())).is_err() {
                            break;
                        }
                    }
                });
            match spawn {
                Ok(_) => spawned += 1,
                Err(e) => {
                    warn!("Failed to spawn reader thread: {}", e);
                    break;
                }
            }
        }
        drop(job_rx);
        drop(result_tx);

        if spawned == 0 {
            read_sequential(files, 0, &mut consume);
            return;
        }

        let mut next_job = 0;
        while next_job < files.len().min(window) {
            if job_tx.send(next_job).is_err() {
                break;
            }
            next_job += 1;
        }

        let mut pending: BTreeMap<usize, ReadResult> = BTreeMap::new();
        let mut next = 0;
        while next < files.len() {
            let content = match pending.remove(&next) {
                Some(content) => content,
                None => match result_rx.recv() {
                    Ok((index, content)) if index == next => content,
                    Ok((index, content)) => {
                        pending.insert(index, content);
                        continue;
                    }
                    // Every reader exited early; finish on this thread
                    Err(_) => {
                        read_sequential(files, next, &mut consume);
                        break;
                    }
                },
            };

            if next_job < files.len() && job_tx.send(next_job).is_ok() {
                next_job += 1;
            }

            let flow = consume(next, content);
            next += 1;
            if flow.is_break() {
                stopped.store(true, Ordering::Release);
                break;
            }
        }

        drop(job_tx);
    });
}

fn read_sequential<F>(files: &[InputFile], start: usize, consume: &mut F)
where
    F: FnMut(usize, ReadResult) -> ControlFlow<()>,
{
    for (index, file) in files.iter().enumerate().skip(start) {
        if consume(index, file.read()).is_break() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<InputFile> {
        (0..n)
            .map(|i| InputFile::from_bytes(format!("f{i}.sdf"), format!("m{i}\n$$$$\n")).unwrap())
            .collect()
    }

    fn collect(files: &[InputFile], workers: usize) -> Vec<(usize, String)> {
        let mut seen = Vec::new();
        read_in_order(files, workers, |index, content| {
            let text = String::from_utf8(content.unwrap().to_vec()).unwrap();
            seen.push((index, text));
            ControlFlow::Continue(())
        });
        seen
    }

    #[test]
    fn test_order_preserved_with_workers() {
        let files = files(25);
        let seen = collect(&files, 4);
        assert_eq!(seen.len(), 25);
        for (i, (index, text)) in seen.iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(text, &format!("m{i}\n$$$$\n"));
        }
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let files = files(7);
        assert_eq!(collect(&files, 1), collect(&files, 3));
    }

    #[test]
    fn test_break_stops_early() {
        let files = files(20);
        let mut consumed = Vec::new();
        read_in_order(&files, 4, |index, _| {
            consumed.push(index);
            if index == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(consumed, vec![0, 1, 2]);
    }

    #[test]
    fn test_read_errors_delivered_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.sdf");
        std::fs::write(&path, "x").unwrap();
        let mut batch = files(3);
        batch.insert(1, InputFile::from_path(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let mut results = Vec::new();
        read_in_order(&batch, 2, |index, content| {
            results.push((index, content.is_ok()));
            ControlFlow::Continue(())
        });
        assert_eq!(results, vec![(0, true), (1, false), (2, true), (3, true)]);
    }
}
