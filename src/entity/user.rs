//! User entity for password authentication.
//!
//! The username is the primary key and the sole namespace key for a user's
//! uploads; there is no surrogate id. Passwords are stored only as Argon2
//! PHC hash strings.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::upload_record::Entity")]
    UploadRecord,
}

impl Related<super::upload_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
