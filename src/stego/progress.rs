// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Progress tracking and cancellation.
//!
//! A [`Progress`] is a cheap cloneable handle over shared atomics. The caller
//! keeps one clone to poll `get()` or call `cancel()` from another thread;
//! the pipeline holds the other and checks it once per sentence, before any
//! collaborator call.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use super::error::StegoError;

#[derive(Debug, Default)]
struct Inner {
    step: AtomicU32,
    total: AtomicU32,
    cancelled: AtomicBool,
}

/// Shared progress and cancellation state for one embed or extract call.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    inner: Arc<Inner>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset progress to 0 and set the total step count.
    ///
    /// The cancellation flag is left alone so a cancel issued before the call
    /// starts still takes effect.
    pub fn init(&self, total: u32) {
        self.inner.step.store(0, Ordering::Relaxed);
        self.inner.total.store(total, Ordering::Relaxed);
    }

    /// Request cancellation. The pipeline returns
    /// [`StegoError::Cancelled`] at its next sentence boundary.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
    }

    /// Clear a previous cancellation so the handle can be reused.
    pub fn reset_cancel(&self) {
        self.inner.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }

    /// Check for cancellation and return an error if requested.
    pub fn check_cancelled(&self) -> Result<(), StegoError> {
        if self.is_cancelled() {
            Err(StegoError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Advance by one step.
    /// Capped at total-1 so the bar never hits 100% before `finish()`.
    /// When total is 0 (indeterminate) the step advances freely.
    pub fn advance(&self) {
        let total = self.inner.total.load(Ordering::Relaxed);
        if total == 0 {
            self.inner.step.fetch_add(1, Ordering::Relaxed);
        } else {
            let _ = self.inner.step.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
                if s + 1 < total { Some(s + 1) } else { Some(s) }
            });
        }
    }

    /// Read the current (step, total) progress.
    pub fn get(&self) -> (u32, u32) {
        (
            self.inner.step.load(Ordering::Relaxed),
            self.inner.total.load(Ordering::Relaxed),
        )
    }

    /// Mark progress as complete (step = total).
    pub fn finish(&self) {
        let t = self.inner.total.load(Ordering::Relaxed);
        self.inner.step.store(t, Ordering::Relaxed);
    }
}
