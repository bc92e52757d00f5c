use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::product::{self, Model as Product, ProductInput};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository over the `product` table.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::ProductId)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let saved = product::save(&self.db, input).await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn row(id: i32, description: &str) -> Product {
        Product { product_id: id, description: Some(description.into()), price: Some(1.5), quantity: Some(3) }
    }

    #[tokio::test]
    async fn find_all_returns_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "a"), row(2, "b")]])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].description.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Product>::new()])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);
        assert!(repo.delete_by_id(5).await.unwrap());
        assert!(!repo.delete_by_id(5).await.unwrap());
    }

    #[tokio::test]
    async fn driver_errors_map_to_db_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);
        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn live_database_round_trip() -> anyhow::Result<()> {
        let Some(db) = crate::test_support::get_db().await? else { return Ok(()); };
        let repo = SeaOrmProductRepository::new(db);

        let created = repo
            .save(ProductInput { product_id: None, description: Some("Widget".into()), price: Some(9.99), quantity: Some(10) })
            .await?;
        assert!(created.product_id > 0);

        let found = repo.find_by_id(created.product_id).await?.expect("created row");
        assert_eq!(found, created);

        let updated = repo.save(found.merge(ProductInput { description: Some("Gadget".into()), ..Default::default() }).into()).await?;
        assert_eq!(updated.product_id, created.product_id);
        assert_eq!(updated.description.as_deref(), Some("Gadget"));
        assert_eq!(updated.price, None);

        assert!(repo.find_all().await?.iter().any(|p| p.product_id == created.product_id));

        assert!(repo.delete_by_id(created.product_id).await?);
        assert!(repo.find_by_id(created.product_id).await?.is_none());
        Ok(())
    }
}
