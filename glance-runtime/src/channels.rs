//! Command mailbox
//!
//! The host link reader, timers and app worker threads all post into one
//! bounded embassy-sync channel. The actor is its only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use portable_atomic::{AtomicU32, Ordering};

use glance_protocol::{HostMessage, Vibration};

/// Commands the mailbox can hold before posts are dropped
pub const MAILBOX_DEPTH: usize = 16;

/// Work for the actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<E> {
    /// Decoded message from the host
    Host(HostMessage),
    /// Render a frame now
    Render,
    /// Vibrate the device
    Vibrate(Vibration),
    /// App-internal completion (a finished fetch, a timer tick)
    App(E),
    /// Deactivate and stop the actor
    Shutdown,
}

/// Multi-producer, single-consumer command queue
pub struct Mailbox<E> {
    channel: Channel<CriticalSectionRawMutex, Command<E>, MAILBOX_DEPTH>,
    dropped: AtomicU32,
}

impl<E> Mailbox<E> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue a command without blocking
    ///
    /// Returns `false` and drops the command if the mailbox is full.
    pub fn post(&self, command: Command<E>) -> bool {
        match self.channel.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!("Mailbox full, dropping command");
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Take the next command if one is queued
    pub fn try_take(&self) -> Option<Command<E>> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next command
    pub async fn take(&self) -> Command<E> {
        self.channel.receive().await
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Number of commands dropped because the mailbox was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<E> Default for Mailbox<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_take_in_order() {
        let mailbox: Mailbox<u8> = Mailbox::new();
        assert!(mailbox.post(Command::Render));
        assert!(mailbox.post(Command::App(3)));

        assert_eq!(mailbox.len(), 2);
        assert_eq!(mailbox.try_take(), Some(Command::Render));
        assert_eq!(mailbox.try_take(), Some(Command::App(3)));
        assert_eq!(mailbox.try_take(), None);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_full_mailbox_drops() {
        let mailbox: Mailbox<()> = Mailbox::new();
        for _ in 0..MAILBOX_DEPTH {
            assert!(mailbox.post(Command::Render));
        }
        assert!(!mailbox.post(Command::Shutdown));
        assert_eq!(mailbox.dropped(), 1);
        assert_eq!(mailbox.len(), MAILBOX_DEPTH);
    }

    #[test]
    fn test_producers_on_other_threads() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        std::thread::scope(|scope| {
            for id in 0..4 {
                let mailbox = &mailbox;
                scope.spawn(move || {
                    mailbox.post(Command::App(id));
                });
            }
        });

        let mut seen: Vec<u32> = std::iter::from_fn(|| mailbox.try_take())
            .filter_map(|command| match command {
                Command::App(id) => Some(id),
                _ => None,
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_take_awaits_next_command() {
        let mailbox: Mailbox<()> = Mailbox::new();
        mailbox.post(Command::Shutdown);
        let command = futures::executor::block_on(mailbox.take());
        assert_eq!(command, Command::Shutdown);
    }
}
