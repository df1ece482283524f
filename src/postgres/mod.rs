// PostgreSQL backend - the production QueryPool implementation
//
// - pool: deadpool-backed pool pair and lease/discard handling
// - params: parameter conversion from DbValue to driver types
// - row: value extraction from driver rows

pub mod params;
pub mod pool;
pub mod row;

pub use pool::PgPool;
