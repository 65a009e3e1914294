/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Spreading a pass over workers
//!
//! A pass is cut into contiguous row chunks, one per worker. Workers only
//! share read-only inputs and each owns its chunk of the output, so
//! nothing is locked. [`RowScheduler::run`] returns once every worker
//! is done, which is the barrier between the two passes.
use resample_core::log::trace;

pub(crate) struct RowScheduler {
    threads: usize
}

impl RowScheduler {
    pub fn new(threads: usize) -> RowScheduler {
        RowScheduler {
            threads: threads.max(1)
        }
    }

    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Rows each worker gets so that `rows` are covered by at most
    /// `threads` chunks
    pub fn rows_per_worker(&self, rows: usize) -> usize {
        rows.div_ceil(self.threads).max(1)
    }

    /// Run `work` over every chunk, returning when all are done
    ///
    /// With the `threads` feature each chunk runs on its own scoped thread,
    /// otherwise they run one after the other on the calling thread.
    pub fn run<C, I, F>(&self, chunks: I, work: F)
    where
        I: IntoIterator<Item = C>,
        C: Send,
        F: Fn(C) + Sync
    {
        #[cfg(feature = "threads")]
        {
            if self.threads > 1 {
                trace!("Running pass on up to {} threads", self.threads);

                std::thread::scope(|s| {
                    let work = &work;

                    let handles: Vec<_> = chunks
                        .into_iter()
                        .map(|chunk| s.spawn(move || work(chunk)))
                        .collect();

                    for handle in handles {
                        if let Err(payload) = handle.join() {
                            std::panic::resume_unwind(payload);
                        }
                    }
                });
                return;
            }
        }
        trace!("Running pass in single threaded mode");

        chunks.into_iter().for_each(work);
    }
}
