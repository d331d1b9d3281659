/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Latitude/longitude pair in decimal degrees.
pub type Coordinate = (f64, f64);
