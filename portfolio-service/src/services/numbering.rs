//! Sequence-number and share-token issuance.
//!
//! Invoice, quotation and receipt numbers all draw from the owner's settings
//! counter under the owner's prefix; contracts keep an independent counter.
//! Both issuers are a single conditional upsert so two concurrent issuances
//! for one owner can never observe the same counter value.

use anyhow::anyhow;
use service_core::error::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

/// Attempts per document insert before a token collision becomes an error.
/// UUIDv7 collisions are vanishingly rare; the bound exists so a broken
/// clock or RNG fails loudly instead of looping.
pub const TOKEN_INSERT_ATTEMPTS: u32 = 3;

/// Prefix for the independent contract sequence.
pub const CONTRACT_PREFIX: &str = "CNT-";

/// Render a sequence number: prefix plus the counter value padded to four
/// digits (wider values render unpadded).
pub fn format_sequence_number(prefix: &str, value: i64) -> String {
    format!("{}{:04}", prefix, value)
}

/// A fresh share token. UUIDv7: random, collision-resistant, time-sortable,
/// and never derivable from a sequence number.
pub fn new_share_token() -> Uuid {
    Uuid::now_v7()
}

/// True when an insert failed only because the generated token already
/// exists, which callers answer by retrying with a fresh token.
pub fn is_token_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                && db_err.constraint().is_some_and(|name| name.contains("token"))
        }
        _ => false,
    }
}

/// Consume the owner's next invoice/quotation/receipt number.
///
/// The upsert creates the settings row from the documented defaults when the
/// owner has none, so the first document an unconfigured owner issues is
/// number 1 under the "INV-" prefix. The RETURNING clause hands back the
/// consumed value, never the stored successor.
#[instrument(skip(pool), fields(owner_id = %owner_id))]
pub async fn next_document_number(pool: &PgPool, owner_id: Uuid) -> Result<String, AppError> {
    let (prefix, consumed): (String, i64) = sqlx::query_as(
        r#"
        INSERT INTO invoice_settings (owner_id, next_invoice_number, updated_utc)
        VALUES ($1, 2, NOW())
        ON CONFLICT (owner_id) DO UPDATE
            SET next_invoice_number = invoice_settings.next_invoice_number + 1,
                updated_utc = NOW()
        RETURNING invoice_prefix, next_invoice_number - 1
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::DatabaseError(anyhow!("Failed to issue document number: {}", e)))?;

    Ok(format_sequence_number(&prefix, consumed))
}

/// Consume the owner's next contract number from the independent counter.
#[instrument(skip(pool), fields(owner_id = %owner_id))]
pub async fn next_contract_number(pool: &PgPool, owner_id: Uuid) -> Result<String, AppError> {
    let (consumed,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO contract_counters (owner_id, next_contract_number)
        VALUES ($1, 2)
        ON CONFLICT (owner_id) DO UPDATE
            SET next_contract_number = contract_counters.next_contract_number + 1
        RETURNING next_contract_number - 1
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::DatabaseError(anyhow!("Failed to issue contract number: {}", e)))?;

    Ok(format_sequence_number(CONTRACT_PREFIX, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_are_zero_padded_to_four_digits() {
        assert_eq!(format_sequence_number("INV-", 1), "INV-0001");
        assert_eq!(format_sequence_number("INV-", 42), "INV-0042");
        assert_eq!(format_sequence_number("CNT-", 999), "CNT-0999");
    }

    #[test]
    fn wide_sequence_numbers_keep_every_digit() {
        assert_eq!(format_sequence_number("INV-", 12345), "INV-12345");
    }

    #[test]
    fn share_tokens_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(new_share_token()));
        }
    }

    #[test]
    fn share_tokens_are_time_sortable() {
        let earlier = new_share_token();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = new_share_token();
        assert!(earlier < later);
    }

    #[test]
    fn share_tokens_are_version_seven() {
        assert_eq!(new_share_token().get_version_num(), 7);
    }
}
