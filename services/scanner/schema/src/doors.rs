use sea_orm::entity::prelude::*;

/// Monitored door. `status` holds `"open"` or `"closed"` (CHECK constraint in the migration).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub status: String,
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
