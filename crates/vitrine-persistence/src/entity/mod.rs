//! `SeaORM` entity definitions

pub mod prelude;

pub mod account;
pub mod portfolio;
pub mod tenant;
