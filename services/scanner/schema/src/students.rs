use sea_orm::entity::prelude::*;

/// Enrolled student. Rows are maintained by the management collaborator.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub course: String,
    pub authorized_to_leave: bool,
    pub photo: Option<String>,
    #[sea_orm(unique)]
    pub scan_code: String,
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
