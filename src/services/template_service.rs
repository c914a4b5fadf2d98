// src/services/template_service.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_write, error::AppError},
    db::TemplateRepository,
    models::template::{
        CreateTemplatePayload, Template, UpdateTemplatePayload, DEFAULT_TEMPLATE_NAME,
    },
};

#[derive(Clone)]
pub struct TemplateService {
    template_repo: TemplateRepository,
    pool: SqlitePool,
}

impl TemplateService {
    pub fn new(template_repo: TemplateRepository, pool: SqlitePool) -> Self {
        Self { template_repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<Template>, AppError> {
        let rows = self.template_repo.list(&self.pool).await?;

        let mut templates = Vec::with_capacity(rows.len());
        for row in rows {
            let users = self.template_repo.list_user_ids(&self.pool, row.id).await?;
            templates.push(Template::from_row(row, users));
        }
        Ok(templates)
    }

    pub async fn create(&self, payload: &CreateTemplatePayload) -> Result<Template, AppError> {
        let name = payload.name.as_deref().unwrap_or(DEFAULT_TEMPLATE_NAME);

        let mut tx = begin_write(&self.pool).await?;

        let row = self.template_repo.create(&mut *tx, name, &payload.body).await?;
        for user_id in &payload.users {
            self.template_repo.add_user(&mut *tx, row.id, *user_id).await?;
        }
        let users = self.template_repo.list_user_ids(&mut *tx, row.id).await?;

        tx.commit().await?;
        Ok(Template::from_row(row, users))
    }

    // Atualização parcial; `users` presente substitui o conjunto todo.
    pub async fn update(&self, id: i64, payload: &UpdateTemplatePayload) -> Result<Template, AppError> {
        let mut tx = begin_write(&self.pool).await?;

        let row = self
            .template_repo
            .update(&mut *tx, id, payload.name.as_deref(), payload.body.as_deref())
            .await?
            .ok_or(AppError::NotFound("template"))?;

        if let Some(user_ids) = &payload.users {
            self.template_repo.clear_users(&mut *tx, id).await?;
            for user_id in user_ids {
                self.template_repo.add_user(&mut *tx, id, *user_id).await?;
            }
        }
        let users = self.template_repo.list_user_ids(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(Template::from_row(row, users))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.template_repo.delete(id).await? {
            return Err(AppError::NotFound("template"));
        }
        Ok(())
    }
}
