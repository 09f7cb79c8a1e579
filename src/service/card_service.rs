use std::collections::HashSet;
use tracing::{info, warn};

use crate::crypto::{CardCipher, card_number_digest};
use crate::db::{CardStorage, NewCard};
use crate::error::VaultError;
use crate::service::batch_file::BatchEntry;
use crate::service::ingest_actor::IngestHandle;
use crate::types::{BatchReport, CardNumber, CardView, Page, PageRequest};

#[derive(Clone)]
pub struct CardService {
    storage: CardStorage,
    cipher: CardCipher,
    ingest: IngestHandle,
}

impl CardService {
    pub fn new(storage: CardStorage, cipher: CardCipher, ingest: IngestHandle) -> Self {
        Self {
            storage,
            cipher,
            ingest,
        }
    }

    pub async fn create_card(&self, number: &CardNumber) -> Result<CardView, VaultError> {
        let card = NewCard::seal(number, &self.cipher)?;
        let stored = self.storage.insert(&card).await?;
        info!(id = stored.id, identifier = %stored.card_number_identifier, "card created");
        Ok(stored.into())
    }

    /// Keep valid 16-digit entries, drop in-file repeats, and store the rest
    /// through the ingest actor.
    pub async fn create_cards_in_batch(
        &self,
        entries: &[BatchEntry],
    ) -> Result<BatchReport, VaultError> {
        let mut report = BatchReport {
            received: entries.len(),
            ..Default::default()
        };
        let mut seen = HashSet::new();
        let mut sealed = Vec::with_capacity(entries.len());

        for entry in entries {
            let Ok(number) = CardNumber::parse(&entry.card_number) else {
                warn!(line = entry.line, identifier = %entry.identifier, "invalid card number, skipping");
                report.invalid += 1;
                continue;
            };
            if !seen.insert(number.as_str().to_owned()) {
                report.duplicates += 1;
                continue;
            }
            sealed.push(NewCard::seal(&number, &self.cipher)?);
        }

        let candidates = sealed.len();
        let written = if sealed.is_empty() {
            0
        } else {
            self.ingest.store_batch(sealed).await? as usize
        };
        report.stored = written;
        report.duplicates += candidates - written;
        Ok(report)
    }

    pub async fn get_card_by_number(&self, card_number: &str) -> Result<CardView, VaultError> {
        let hash = card_number_digest(card_number);
        let card = self
            .storage
            .find_by_hash(&hash)
            .await?
            .ok_or_else(|| VaultError::NotFound("Card not found".to_string()))?;

        if card.decrypt_number(&self.cipher)? != card_number {
            warn!(id = card.id, "stored ciphertext does not match digest lookup");
            return Err(VaultError::NotFound("Card not found".to_string()));
        }
        Ok(card.into())
    }

    pub async fn get_card_by_identifier(&self, identifier: &str) -> Result<CardView, VaultError> {
        self.storage
            .find_by_identifier(identifier)
            .await?
            .map(Into::into)
            .ok_or_else(|| VaultError::NotFound("Card not found".to_string()))
    }

    pub async fn get_all_cards(&self, page: PageRequest) -> Result<Page<CardView>, VaultError> {
        let cards = self.storage.list(page).await?;
        let total = self.storage.count().await?;
        Ok(Page::new(cards, page, total).map(Into::into))
    }
}
