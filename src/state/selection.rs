//! Selection tracking for the sites view.
//!
//! Holds at most one record. Until something has been selected (or the
//! selection was explicitly cleared) a successful load picks the first
//! record; after that, refreshes never move the selection to a different
//! record.

use super::record::StatusRecord;

/// How the held record relates to fresh data after a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Keep showing the snapshot taken when the record was selected.
    #[default]
    Snapshot,
    /// Swap in the record with the same id from each new list, if present.
    FollowId,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<StatusRecord>,
    policy: SelectionPolicy,
    settled: bool,
}

impl Selection {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            current: None,
            policy,
            settled: false,
        }
    }

    pub fn current(&self) -> Option<&StatusRecord> {
        self.current.as_ref()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.current.as_ref().map(|r| r.id)
    }

    /// Local change only.
    pub fn select(&mut self, record: StatusRecord) {
        self.current = Some(record);
        self.settled = true;
    }

    /// Drop the selection for good; refreshes will not pick a new one.
    pub fn clear(&mut self) {
        self.current = None;
        self.settled = true;
    }

    /// Reconcile with a successfully fetched list.
    pub fn on_refresh(&mut self, records: &[StatusRecord]) {
        if !self.settled {
            if let Some(first) = records.first() {
                self.select(first.clone());
            }
            return;
        }

        if self.policy == SelectionPolicy::FollowId {
            if let Some(id) = self.selected_id() {
                if let Some(fresh) = records.iter().find(|r| r.id == id) {
                    self.current = Some(fresh.clone());
                }
            }
        }
    }

    /// Move to the record after the current one, wrapping around.
    pub fn select_next(&mut self, records: &[StatusRecord]) {
        self.step(records, |pos, len| (pos + 1) % len);
    }

    /// Move to the record before the current one, wrapping around.
    pub fn select_prev(&mut self, records: &[StatusRecord]) {
        self.step(records, |pos, len| (pos + len - 1) % len);
    }

    fn step(&mut self, records: &[StatusRecord], advance: impl Fn(usize, usize) -> usize) {
        if records.is_empty() {
            return;
        }
        let next = match self.position_in(records) {
            Some(pos) => advance(pos, records.len()),
            None => 0,
        };
        self.select(records[next].clone());
    }

    /// Index of the selected record within `records`, matched by id.
    pub fn position_in(&self, records: &[StatusRecord]) -> Option<usize> {
        let id = self.selected_id()?;
        records.iter().position(|r| r.id == id)
    }
}
