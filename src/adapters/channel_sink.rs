//! Channel sink adapter
//!
//! Forwards readings into an `embassy_sync` channel drained by the posting
//! task. Never waits: on a full queue the reading is dropped and reported.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender};

use crate::domain::Reading;
use crate::ports::{PublishError, ReadingSink};

/// [`ReadingSink`] over the sending half of a channel
pub struct ChannelSink<'ch, M: RawMutex, const N: usize> {
    sender: Sender<'ch, M, Reading, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelSink<'ch, M, N> {
    pub fn new(channel: &'ch Channel<M, Reading, N>) -> Self {
        Self {
            sender: channel.sender(),
        }
    }
}

impl<'ch, M: RawMutex, const N: usize> ReadingSink for ChannelSink<'ch, M, N> {
    async fn publish(&mut self, reading: Reading) -> Result<(), PublishError> {
        self.sender
            .try_send(reading)
            .map_err(|_| PublishError::QueueFull)
    }
}
