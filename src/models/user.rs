use diesel::prelude::*;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
}

/// NewUser model for inserting new records
///
/// Carries no `id`: the database assigns it on insert.
#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub phone: Option<String>,
}
