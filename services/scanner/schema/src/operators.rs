use sea_orm::entity::prelude::*;

/// Gate station account. Populated by the auth collaborator; referenced by exit logs.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "operators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub role: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exit_logs::Entity")]
    ExitLogs,
}

impl Related<super::exit_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExitLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
