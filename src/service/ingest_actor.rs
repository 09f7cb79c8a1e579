use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{info, warn};

use crate::db::{CardStorage, NewCard};
use crate::error::VaultError;

/// Messages handled by the card ingest actor.
#[derive(Debug)]
pub enum IngestMessage {
    /// Persist a sealed batch in one transaction; reply with rows written.
    StoreBatch(Vec<NewCard>, RpcReplyPort<Result<u64, VaultError>>),
}

/// Handle for submitting batches to the ingest actor.
#[derive(Clone)]
pub struct IngestHandle {
    actor: ActorRef<IngestMessage>,
}

impl IngestHandle {
    /// Store a batch and wait for the actor to commit it.
    pub async fn store_batch(&self, cards: Vec<NewCard>) -> Result<u64, VaultError> {
        ractor::call!(self.actor, IngestMessage::StoreBatch, cards)
            .map_err(|e| VaultError::RactorError(format!("StoreBatch RPC failed: {e}")))?
    }
}

struct IngestState {
    storage: CardStorage,
    batches: u64,
    stored: u64,
}

/// Single writer for bulk card inserts, so batch transactions never interleave.
struct IngestActor;

#[ractor::async_trait]
impl Actor for IngestActor {
    type Msg = IngestMessage;
    type State = IngestState;
    type Arguments = CardStorage;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        storage: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("CardIngestActor started");
        Ok(IngestState {
            storage,
            batches: 0,
            stored: 0,
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            IngestMessage::StoreBatch(cards, reply_port) => {
                let submitted = cards.len();
                let result = state.storage.insert_many_skip_existing(&cards).await;
                match &result {
                    Ok(written) => {
                        state.batches += 1;
                        state.stored += written;
                        info!(
                            submitted,
                            written,
                            total_batches = state.batches,
                            total_stored = state.stored,
                            "batch committed"
                        );
                    }
                    Err(e) => warn!(submitted, error = %e, "batch insert failed; rolled back"),
                }
                let _ = reply_port.send(result);
            }
        }
        Ok(())
    }
}

/// Spawn an unnamed ingest actor over the given storage.
pub async fn spawn(storage: CardStorage) -> Result<IngestHandle, VaultError> {
    let (actor, _jh) = Actor::spawn(None, IngestActor, storage)
        .await
        .map_err(|e| VaultError::RactorError(format!("failed to spawn CardIngestActor: {e}")))?;
    Ok(IngestHandle { actor })
}
