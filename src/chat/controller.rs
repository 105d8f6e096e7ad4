use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use anyhow::{bail, Result};
use log::error;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time,
};
use tokio_util::sync::CancellationToken;

use super::replies::{pick_reply, ReplyDelay};
use crate::{
    db::Database,
    local_store::{LocalStore, CHAT_MESSAGES_KEY},
    log_info,
    models::{ChatMessage, Sender},
};

const ENABLE_LOGS: bool = true;
const EVENT_CAPACITY: usize = 64;

/// Message list shared between the controller and its pending replies.
struct ChatLog {
    messages: Mutex<Vec<ChatMessage>>,
    store: LocalStore<ChatMessage>,
    events: broadcast::Sender<ChatMessage>,
}

impl ChatLog {
    async fn append(&self, sender: Sender, text: String) -> Result<ChatMessage> {
        let message = ChatMessage::new(sender, text);
        {
            // Persist under the lock so snapshots follow append order.
            let mut guard = self.messages.lock().await;
            let mut next = guard.clone();
            next.push(message.clone());
            self.store.save(&next).await?;
            *guard = next;
        }
        // No subscribers is fine.
        let _ = self.events.send(message.clone());
        Ok(message)
    }
}

/// Owns the scheduled coach replies. Dropping it cancels whatever is pending.
struct ReplyScheduler {
    cancel_token: CancellationToken,
    handles: StdMutex<Vec<JoinHandle<()>>>,
    delay: StdMutex<ReplyDelay>,
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Append-only chat with the scripted coach.
///
/// Every user message schedules one coach reply after a random delay. The
/// reply runs as a task owned by this controller: [`ChatController::shutdown`]
/// or dropping the last clone cancels replies that have not fired yet.
#[derive(Clone)]
pub struct ChatController {
    log: Arc<ChatLog>,
    scheduler: Arc<ReplyScheduler>,
}

impl ChatController {
    pub async fn open(db: Database, delay: ReplyDelay) -> Result<Self> {
        let store = LocalStore::new(db, CHAT_MESSAGES_KEY);
        let messages = store.load().await?;
        log_info!("Loaded {} chat messages", messages.len());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            log: Arc::new(ChatLog {
                messages: Mutex::new(messages),
                store,
                events,
            }),
            scheduler: Arc::new(ReplyScheduler {
                cancel_token: CancellationToken::new(),
                handles: StdMutex::new(Vec::new()),
                delay: StdMutex::new(delay),
            }),
        })
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.log.messages.lock().await.clone()
    }

    /// Receives every message appended from now on, coach replies included.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.log.events.subscribe()
    }

    /// Appends `text` from `sender` and returns the stored message. A user
    /// message also schedules a coach reply; this call does not wait for it.
    pub async fn send(&self, text: &str, sender: Sender) -> Result<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            bail!("cannot send an empty message");
        }

        let message = self.log.append(sender, text.to_string()).await?;
        if sender == Sender::User {
            self.schedule_reply();
        }
        Ok(message)
    }

    /// Applies to replies scheduled from now on; pending ones keep their delay.
    pub fn set_reply_delay(&self, delay: ReplyDelay) {
        *self
            .scheduler
            .delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = delay;
    }

    pub fn reply_delay(&self) -> ReplyDelay {
        *self
            .scheduler
            .delay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of scheduled replies that have not finished yet.
    pub fn pending_replies(&self) -> usize {
        self.handles()
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Cancels pending replies and waits until none of them can still append.
    pub async fn shutdown(&self) {
        self.scheduler.cancel_token.cancel();
        let handles = std::mem::take(&mut *self.handles());
        for handle in handles {
            if let Err(err) = handle.await {
                error!("Coach reply task failed to join: {err}");
            }
        }
        log_info!("Chat controller shut down");
    }

    fn schedule_reply(&self) {
        let delay = self.reply_delay().sample(&mut rand::thread_rng());
        let token = self.scheduler.cancel_token.clone();
        let log = Arc::clone(&self.log);

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log_info!("Coach reply cancelled before it was sent");
                }
                _ = time::sleep(delay) => {
                    let text = pick_reply(&mut rand::thread_rng()).to_string();
                    if let Err(err) = log.append(Sender::Coach, text).await {
                        error!("Failed to append coach reply: {err:#}");
                    }
                }
            }
        });

        let mut handles = self.handles();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }

    fn handles(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.scheduler
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
