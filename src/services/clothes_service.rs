// src/services/clothes_service.rs

use chrono::Utc;
use rand::Rng;
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_write, error::AppError},
    db::ClothesRepository,
    models::clothes::{Clothes, CreateClothesPayload, CreateReprintPayload, Reprint},
};

// IDs de roupa: 9 dígitos de 1 a 9 (cabem na etiqueta e nunca começam com zero).
pub const CLOTHES_ID_DIGITS: usize = 9;
const MAX_ID_ATTEMPTS: usize = 5;

/// Número com `num` dígitos aleatórios, todos diferentes de zero.
pub fn generate_unique(num: usize) -> i64 {
    let mut rng = rand::thread_rng();
    (0..num).fold(0i64, |acc, _| acc * 10 + rng.gen_range(1..=9))
}

#[derive(Clone)]
pub struct ClothesService {
    clothes_repo: ClothesRepository,
    pool: SqlitePool,
}

impl ClothesService {
    pub fn new(clothes_repo: ClothesRepository, pool: SqlitePool) -> Self {
        Self { clothes_repo, pool }
    }

    pub async fn create(&self, payload: &CreateClothesPayload) -> Result<Clothes, AppError> {
        let indate = payload.indate.unwrap_or_else(|| Utc::now().date_naive());

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = generate_unique(CLOTHES_ID_DIGITS);
            match self.clothes_repo.create(id, payload, indate, Utc::now()).await {
                Err(AppError::AlreadyExists(column)) if column == "id" => {
                    tracing::warn!(id, attempt, "Colisão de ID de roupa, gerando outro");
                }
                result => return result,
            }
        }

        Err(anyhow::anyhow!("Nenhum ID livre após {} tentativas", MAX_ID_ATTEMPTS).into())
    }

    // ---
    // Reimpressões
    // ---

    /// Registra a reimpressão e marca a roupa como reimpressa na mesma transação.
    pub async fn reprint(&self, clothes_id: i64, payload: &CreateReprintPayload) -> Result<Reprint, AppError> {
        let mut tx = begin_write(&self.pool).await?;

        // Marca primeiro: a roupa inexistente já sai aqui como 404
        self.clothes_repo.mark_reprinted(&mut *tx, clothes_id).await?;

        let reprint = self
            .clothes_repo
            .create_reprint(
                &mut *tx,
                clothes_id,
                payload.rfid,
                &payload.reason,
                payload.image.as_deref(),
                Utc::now(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(clothes_id, rfid = payload.rfid, "Etiqueta reimpressa");
        Ok(reprint)
    }

    pub async fn list_reprints(&self, clothes_id: i64) -> Result<Vec<Reprint>, AppError> {
        if self.clothes_repo.find_by_id(&self.pool, clothes_id).await?.is_none() {
            return Err(AppError::NotFound("clothes"));
        }
        self.clothes_repo.list_reprints(clothes_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_only_nonzero_digits() {
        for _ in 0..100 {
            let id = generate_unique(CLOTHES_ID_DIGITS);
            let digits = id.to_string();
            assert_eq!(digits.len(), CLOTHES_ID_DIGITS);
            assert!(!digits.contains('0'));
        }
    }

    #[test]
    fn zero_digits_yield_zero() {
        assert_eq!(generate_unique(0), 0);
    }
}
