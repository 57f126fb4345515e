use sea_orm::entity::prelude::*;

/// Pending activation challenge for a not-yet-active account.
/// One per account; removed on success, or together with its account once
/// the attempt counter is exhausted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub provisional_id: Uuid,
    #[sea_orm(unique)]
    pub account_id: i64,
    pub code: String,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub attempt_counter: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
