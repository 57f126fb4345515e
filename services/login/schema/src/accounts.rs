use sea_orm::entity::prelude::*;

/// Account record owned by the login service.
///
/// `roles` stores comma-joined role wire strings (`"CUSTOMER"`, `"ADMIN"`).
/// `email` is null for admin accounts; the unique constraint applies only to
/// present values.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: String,
    pub active: bool,
    pub roles: String,
    pub enrolling_capability: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::activations::Entity")]
    Activation,
}

impl Related<super::activations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
