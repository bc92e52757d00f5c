use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Write-side shape of a product: the request body for create/update and
/// the argument to `save`. A missing `product_id` means "not persisted yet".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl ProductInput {
    /// Drops any client-supplied id so that saving always inserts.
    pub fn without_id(self) -> Self {
        Self { product_id: None, ..self }
    }
}

impl Model {
    /// Overwrites description, price and quantity with the values from
    /// `changes`. The stored id is kept whatever `changes.product_id` says.
    pub fn merge(self, changes: ProductInput) -> Model {
        Model {
            product_id: self.product_id,
            description: changes.description,
            price: changes.price,
            quantity: changes.quantity,
        }
    }
}

impl From<Model> for ProductInput {
    fn from(m: Model) -> Self {
        Self {
            product_id: Some(m.product_id),
            description: m.description,
            price: m.price,
            quantity: m.quantity,
        }
    }
}

pub async fn insert(db: &DatabaseConnection, input: ProductInput) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        product_id: NotSet,
        description: Set(input.description),
        price: Set(input.price),
        quantity: Set(input.quantity),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn overwrite(db: &DatabaseConnection, existing: Model, input: ProductInput) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    am.description = Set(input.description);
    am.price = Set(input.price);
    am.quantity = Set(input.quantity);
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert-or-update keyed on `product_id`. An id that is absent or unknown
/// produces a new row with a database-assigned id.
pub async fn save(db: &DatabaseConnection, input: ProductInput) -> Result<Model, errors::ModelError> {
    let existing = match input.product_id {
        Some(id) => Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| errors::ModelError::Db(e.to_string()))?,
        None => None,
    };
    match existing {
        Some(found) => overwrite(db, found, input).await,
        None => insert(db, input).await,
    }
}
