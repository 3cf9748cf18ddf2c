use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Counted, index-keyed join over `n` independent jobs.
///
/// Jobs may complete in any order; each result is stored in the slot of the job that produced
/// it, so the joined output is in submission order regardless of arrival order.
#[derive(Debug)]
pub struct DecodeJoin<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
}

impl<T> DecodeJoin<T> {
    /// Join over `n` jobs. A join over zero jobs is immediately ready.
    pub fn new(n: usize) -> Self {
        let mut slots = Vec::with_capacity(n);
        slots.resize_with(n, || None);
        Self {
            slots,
            remaining: n,
        }
    }

    /// Number of jobs still outstanding.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Return `true` once every job has completed.
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Record the result of job `index`.
    ///
    /// Returns `true` when this completion was the last one outstanding.
    pub fn complete(&mut self, index: usize, value: T) -> PhotoboothResult<bool> {
        let n = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            PhotoboothError::validation(format!("join index {index} out of range (n={n})"))
        })?;
        if slot.is_some() {
            return Err(PhotoboothError::validation(format!(
                "join index {index} completed twice"
            )));
        }
        *slot = Some(value);
        self.remaining -= 1;
        Ok(self.remaining == 0)
    }

    /// Consume the join, yielding results in index order.
    pub fn into_results(self) -> PhotoboothResult<Vec<T>> {
        if self.remaining != 0 {
            return Err(PhotoboothError::validation(format!(
                "join still has {} outstanding jobs",
                self.remaining
            )));
        }
        self.slots
            .into_iter()
            .map(|s| s.ok_or_else(|| PhotoboothError::validation("join slot missing (bug)")))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/join.rs"]
mod tests;
