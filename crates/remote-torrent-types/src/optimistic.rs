//! Local predictions for mutations, for callers that cache torrent lists.
//!
//! A caller snapshots its cached list with [`apply`], renders the predicted state,
//! refetches shortly after to reconcile, and calls [`Snapshot::rollback`] if the
//! mutation failed.

use crate::{Status, TorrentId, TorrentListItem};

/// A mutation whose effect can be predicted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentAction {
    /// Start, honouring the queue.
    Start,
    /// Start, bypassing the queue.
    StartNow,
    /// Stop transferring.
    Stop,
    /// Check local data.
    Verify,
    /// Remove from the daemon.
    Remove,
}

impl TorrentAction {
    /// Status a torrent is expected to show after this action, `None` once removed.
    pub fn predicted_status(self, current: Status, complete: bool) -> Option<Status> {
        let running = if complete {
            Status::Seeding
        } else {
            Status::Downloading
        };
        match self {
            TorrentAction::Start | TorrentAction::StartNow => Some(running),
            TorrentAction::Stop => Some(Status::Stopped),
            TorrentAction::Verify => Some(match current {
                Status::VerifyingLocalData => Status::VerifyingLocalData,
                _ => Status::QueuedToVerifyLocalData,
            }),
            TorrentAction::Remove => None,
        }
    }
}

/// A cached row an action can be predicted for.
pub trait OptimisticItem: Clone {
    /// Identifier the action targets.
    fn torrent_id(&self) -> &TorrentId;
    /// Current status.
    fn status(&self) -> Status;
    /// Whether all wanted data is present.
    fn is_complete(&self) -> bool;
    /// Overwrites the status.
    fn set_status(&mut self, status: Status);
}

impl OptimisticItem for TorrentListItem {
    fn torrent_id(&self) -> &TorrentId {
        &self.id
    }

    fn status(&self) -> Status {
        self.status
    }

    fn is_complete(&self) -> bool {
        self.left_until_done == 0 && self.percent_done >= 1.0
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

/// The list as it was before an optimistic change.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Restores the cached list to the snapshot.
    pub fn rollback(self, list: &mut Vec<T>) {
        *list = self.items;
    }
}

/// Applies `action` to every listed id in `list` and returns the prior state.
pub fn apply<T: OptimisticItem>(
    list: &mut Vec<T>,
    ids: &[TorrentId],
    action: TorrentAction,
) -> Snapshot<T> {
    let snapshot = Snapshot {
        items: list.clone(),
    };

    list.retain_mut(|item| {
        if !ids.contains(item.torrent_id()) {
            return true;
        }
        match action.predicted_status(item.status(), item.is_complete()) {
            Some(status) => {
                item.set_status(status);
                true
            }
            None => false,
        }
    });

    snapshot
}
