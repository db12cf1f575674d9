//! Contract queries.

use super::Database;
use crate::models::{Contract, CreateContract};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::numbering;
use service_core::error::AppError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const CONTRACT_COLUMNS: &str = "id, owner_id, contract_number, template_type, template_name, \
     client_id, project_name, project_scope, deliverables, start_date, end_date, \
     signature_date, project_fee, payment_terms, currency, client_signature, \
     client_signature_type, business_signature, business_signature_type, status, \
     generated_content, notes, token, view_count, created_utc, updated_utc";

impl Database {
    /// Create a contract under an already-issued number, with token-collision
    /// retry. Contracts have no line items, so no transaction is needed.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, contract_number = %contract_number))]
    pub async fn create_contract(
        &self,
        owner_id: Uuid,
        contract_number: &str,
        input: &CreateContract,
    ) -> Result<Contract, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_contract"])
            .start_timer();

        for attempt in 1..=numbering::TOKEN_INSERT_ATTEMPTS {
            let token = numbering::new_share_token();

            let inserted = sqlx::query_as::<_, Contract>(&format!(
                r#"
                INSERT INTO contracts (
                    id, owner_id, contract_number, template_type, template_name, client_id,
                    project_name, project_scope, deliverables, start_date, end_date,
                    signature_date, project_fee, payment_terms, currency, client_signature,
                    client_signature_type, business_signature, business_signature_type,
                    status, generated_content, notes, token
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23)
                RETURNING {CONTRACT_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(contract_number)
            .bind(&input.template_type)
            .bind(&input.template_name)
            .bind(input.client_id)
            .bind(&input.project_name)
            .bind(&input.project_scope)
            .bind(&input.deliverables)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.signature_date)
            .bind(input.project_fee)
            .bind(&input.payment_terms)
            .bind(&input.currency)
            .bind(&input.client_signature)
            .bind(input.client_signature_type.map(|s| s.as_str()))
            .bind(&input.business_signature)
            .bind(input.business_signature_type.map(|s| s.as_str()))
            .bind(input.status.as_str())
            .bind(&input.generated_content)
            .bind(&input.notes)
            .bind(token)
            .fetch_one(&self.pool)
            .await;

            match inserted {
                Ok(contract) => {
                    timer.observe_duration();
                    info!(
                        contract_id = %contract.id,
                        contract_number = %contract.contract_number,
                        "Contract created"
                    );
                    return Ok(contract);
                }
                Err(ref e) if numbering::is_token_collision(e) => {
                    warn!(attempt = attempt, "Share token collision, regenerating");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "Failed to create contract: {}",
                        e
                    )))
                }
            }
        }

        Err(AppError::InternalError(anyhow::anyhow!(
            "Share token generation kept colliding"
        )))
    }

    /// Fully replace a contract. Number and token are never touched.
    #[instrument(skip(self, input), fields(owner_id = %owner_id, contract_id = %contract_id))]
    pub async fn update_contract(
        &self,
        owner_id: Uuid,
        contract_id: Uuid,
        input: &CreateContract,
    ) -> Result<Option<Contract>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_contract"])
            .start_timer();

        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts
            SET template_type = $3, template_name = $4, client_id = $5, project_name = $6,
                project_scope = $7, deliverables = $8, start_date = $9, end_date = $10,
                signature_date = $11, project_fee = $12, payment_terms = $13, currency = $14,
                client_signature = $15, client_signature_type = $16, business_signature = $17,
                business_signature_type = $18, status = $19, generated_content = $20,
                notes = $21, updated_utc = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(contract_id)
        .bind(&input.template_type)
        .bind(&input.template_name)
        .bind(input.client_id)
        .bind(&input.project_name)
        .bind(&input.project_scope)
        .bind(&input.deliverables)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.signature_date)
        .bind(input.project_fee)
        .bind(&input.payment_terms)
        .bind(&input.currency)
        .bind(&input.client_signature)
        .bind(input.client_signature_type.map(|s| s.as_str()))
        .bind(&input.business_signature)
        .bind(input.business_signature_type.map(|s| s.as_str()))
        .bind(input.status.as_str())
        .bind(&input.generated_content)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update contract: {}", e))
        })?;

        timer.observe_duration();

        if let Some(ref contract) = contract {
            info!(contract_id = %contract.id, "Contract updated");
        }

        Ok(contract)
    }

    /// Get a contract by id.
    #[instrument(skip(self), fields(owner_id = %owner_id, contract_id = %contract_id))]
    pub async fn get_contract(
        &self,
        owner_id: Uuid,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE owner_id = $1 AND id = $2
            "#
        ))
        .bind(owner_id)
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get contract: {}", e)))?;

        Ok(contract)
    }

    /// List all contracts for an owner, newest first.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_contracts(&self, owner_id: Uuid) -> Result<Vec<Contract>, AppError> {
        let contracts = sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE owner_id = $1
            ORDER BY created_utc DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list contracts: {}", e)))?;

        Ok(contracts)
    }

    /// Delete a contract.
    #[instrument(skip(self), fields(owner_id = %owner_id, contract_id = %contract_id))]
    pub async fn delete_contract(
        &self,
        owner_id: Uuid,
        contract_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contracts WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(contract_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete contract: {}", e))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(contract_id = %contract_id, "Contract deleted");
        }

        Ok(deleted)
    }

    /// Resolve a share token to a contract.
    #[instrument(skip(self))]
    pub async fn get_contract_by_token(&self, token: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to resolve contract token: {}", e))
        })?;

        Ok(contract)
    }

    /// Bump the public view counter. Best-effort at the call site.
    pub async fn increment_contract_views(&self, contract_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE contracts SET view_count = view_count + 1 WHERE id = $1")
            .bind(contract_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to increment views: {}", e))
            })?;
        Ok(())
    }
}
