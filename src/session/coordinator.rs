//! Maps connection events onto board operations.
//!
//! Each request, disconnect, and tick runs entirely under one mutex over
//! the [`Board`]. Resulting events are published on the broadcast channel
//! before the mutex is released, so every subscriber sees them in the
//! order the mutations happened. Failures go back to the requester only.

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::GlobalConfig;
use crate::models::block::{BlockId, ClientId};
use crate::models::events::{BoardSnapshot, ClientIntent, ServerEvent};

/// Events produced by one request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Sent to the requesting client only.
    pub reply: Option<ServerEvent>,
    /// Sent to every connected client.
    pub broadcast: Vec<ServerEvent>,
}

impl Outcome {
    fn reply(event: ServerEvent) -> Self {
        Self {
            reply: Some(event),
            broadcast: Vec::new(),
        }
    }

    fn broadcast(event: ServerEvent) -> Self {
        Self {
            reply: None,
            broadcast: vec![event],
        }
    }
}

/// Apply one client intent to the board.
pub fn dispatch(board: &mut Board, who: ClientId, intent: ClientIntent) -> Outcome {
    match intent {
        ClientIntent::LockBlock { block_id } => match board.lock(block_id, who) {
            Ok(_) => {
                info!(block_id, %who, "block locked");
                Outcome::broadcast(ServerEvent::BlockLocked {
                    block_id,
                    locked_by: who,
                })
            }
            Err(err) => {
                debug!(block_id, %who, %err, "lock rejected");
                Outcome::reply(ServerEvent::LockFailed {
                    message: err.to_string(),
                    block_id,
                })
            }
        },
        ClientIntent::MoveBlock { block_id, row, col } => {
            match board.move_block(block_id, who, row, col) {
                Ok(block) => {
                    info!(block_id, %who, row = block.row, col = block.col, "block placed");
                    Outcome::broadcast(ServerEvent::BlockPlaced(block))
                }
                Err(err) => {
                    debug!(block_id, %who, %err, "move rejected");
                    Outcome::reply(ServerEvent::Error {
                        message: err.to_string(),
                        block_id: Some(block_id),
                    })
                }
            }
        }
        ClientIntent::UnlockBlock { block_id } => {
            if board.unlock(block_id, who) {
                info!(block_id, %who, "block unlocked");
                Outcome::broadcast(ServerEvent::BlockUnlocked { block_id })
            } else {
                Outcome::default()
            }
        }
    }
}

/// Shared board plus the fan-out channel to connected clients.
#[derive(Debug)]
pub struct Coordinator {
    board: Mutex<Board>,
    events: broadcast::Sender<ServerEvent>,
}

impl Coordinator {
    /// Wrap `board`, buffering up to `event_buffer` undelivered events per subscriber.
    #[must_use]
    pub fn new(board: Board, event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self {
            board: Mutex::new(board),
            events,
        }
    }

    /// Build an unpopulated board from configuration.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(Board::new(config.round, config.rng_seed), config.event_buffer)
    }

    /// Subscribe to broadcast events without taking a snapshot.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    /// Populate the grid and begin a running phase.
    pub async fn start_round(&self) {
        let mut board = self.board.lock().await;
        let event = board.start_round();
        self.publish(vec![event]);
    }

    /// Register a new connection.
    ///
    /// Returns the `initialState` reply and a receiver that observes every
    /// event emitted after that snapshot was taken.
    pub async fn connect(&self, who: ClientId) -> (ServerEvent, broadcast::Receiver<ServerEvent>) {
        let board = self.board.lock().await;
        let receiver = self.events.subscribe();
        info!(%who, "client connected");
        (ServerEvent::InitialState(board.snapshot()), receiver)
    }

    /// Fresh snapshot and receiver for a client that fell behind the
    /// broadcast buffer. Its locks are kept.
    pub async fn resync(&self, who: ClientId) -> (ServerEvent, broadcast::Receiver<ServerEvent>) {
        let board = self.board.lock().await;
        let receiver = self.events.subscribe();
        debug!(%who, "client resynchronised");
        (ServerEvent::InitialState(board.snapshot()), receiver)
    }

    /// Apply a client request, broadcasting successes and returning the
    /// reply for the requester, if any.
    pub async fn handle(&self, who: ClientId, intent: ClientIntent) -> Option<ServerEvent> {
        let mut board = self.board.lock().await;
        let outcome = dispatch(&mut board, who, intent);
        self.publish(outcome.broadcast);
        outcome.reply
    }

    /// Release every lock `who` holds and announce each release.
    pub async fn disconnect(&self, who: ClientId) -> Vec<BlockId> {
        let mut board = self.board.lock().await;
        let released = board.release_all(who);
        info!(%who, released = released.len(), "client disconnected");
        self.publish(
            released
                .iter()
                .map(|&block_id| ServerEvent::BlockUnlocked { block_id })
                .collect(),
        );
        released
    }

    /// Advance the round countdown by one tick.
    pub async fn tick(&self) {
        let mut board = self.board.lock().await;
        let events = board.tick();
        self.publish(events);
    }

    /// Current board snapshot.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.board.lock().await.snapshot()
    }

    /// Run `f` against the board under the mutex.
    ///
    /// Nothing is broadcast; intended for inspection and for seeding
    /// specific layouts.
    pub async fn with_board<T>(&self, f: impl FnOnce(&mut Board) -> T) -> T {
        let mut board = self.board.lock().await;
        f(&mut board)
    }

    fn publish(&self, events: Vec<ServerEvent>) {
        for event in events {
            let name = event.name();
            // `send` only fails when nobody is subscribed.
            if self.events.send(event).is_err() {
                debug!(event = name, "no subscribers for event");
            }
        }
    }
}
