use deadpool_postgres::Config as PgConfig;

use crate::error::RelayDbError;

/// Pool size when `dev_mode` is set.
pub const DEV_POOL_SIZE: usize = 5;
/// Pool size when primary and replica share one physical server.
pub const SHARED_POOL_SIZE: usize = 10;
/// Pool size when primary and replica are distinct physical targets.
pub const SPLIT_POOL_SIZE: usize = 25;

/// Connection settings for the primary/replica pool pair.
///
/// The replica may point at the same physical server as the primary; the
/// sizing policy accounts for that (see [`RelaySettings::max_pool_size`]).
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Read/write endpoint.
    pub primary: PgConfig,
    /// Read-only endpoint, possibly lagging behind the primary.
    pub replica: PgConfig,
    /// Low-traffic/development mode; keeps both pools small.
    pub dev_mode: bool,
}

impl RelaySettings {
    #[must_use]
    pub fn new(primary: PgConfig, replica: PgConfig, dev_mode: bool) -> Self {
        Self {
            primary,
            replica,
            dev_mode,
        }
    }

    /// Whether both roles resolve to one physical server.
    #[must_use]
    pub fn shares_endpoint(&self) -> bool {
        self.primary.host == self.replica.host
            && self.primary.port == self.replica.port
            && self.primary.dbname == self.replica.dbname
    }

    /// Maximum connections per pool.
    ///
    /// Reproducible policy: small and fixed in dev mode; generous when the
    /// replica is a separate server; conservative when one server carries
    /// both roles and write contention must not starve it.
    #[must_use]
    pub fn max_pool_size(&self) -> usize {
        if self.dev_mode {
            DEV_POOL_SIZE
        } else if self.shares_endpoint() {
            SHARED_POOL_SIZE
        } else {
            SPLIT_POOL_SIZE
        }
    }

    /// Validate that both endpoints carry the fields pool creation needs.
    ///
    /// # Errors
    /// Returns `RelayDbError::ConfigError` naming the first missing field.
    pub fn validate(&self) -> Result<(), RelayDbError> {
        validate_endpoint(&self.primary, "primary")?;
        validate_endpoint(&self.replica, "replica")
    }
}

fn validate_endpoint(cfg: &PgConfig, role: &str) -> Result<(), RelayDbError> {
    if cfg.dbname.is_none() {
        return Err(RelayDbError::ConfigError(format!(
            "{role}: dbname is required"
        )));
    }
    if cfg.host.is_none() {
        return Err(RelayDbError::ConfigError(format!(
            "{role}: host is required"
        )));
    }
    if cfg.port.is_none() {
        return Err(RelayDbError::ConfigError(format!(
            "{role}: port is required"
        )));
    }
    if cfg.user.is_none() {
        return Err(RelayDbError::ConfigError(format!(
            "{role}: user is required"
        )));
    }
    if cfg.password.is_none() {
        return Err(RelayDbError::ConfigError(format!(
            "{role}: password is required"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(host: &str, port: u16, dbname: &str) -> PgConfig {
        let mut cfg = PgConfig::new();
        cfg.host = Some(host.to_string());
        cfg.port = Some(port);
        cfg.dbname = Some(dbname.to_string());
        cfg.user = Some("app".to_string());
        cfg.password = Some("secret".to_string());
        cfg
    }

    #[test]
    fn sizing_policy_is_a_function_of_mode_and_topology() {
        let split = RelaySettings::new(
            endpoint("db-primary", 5432, "app"),
            endpoint("db-replica", 5432, "app"),
            false,
        );
        assert!(!split.shares_endpoint());
        assert_eq!(split.max_pool_size(), SPLIT_POOL_SIZE);

        let shared = RelaySettings::new(
            endpoint("db", 5432, "app"),
            endpoint("db", 5432, "app"),
            false,
        );
        assert!(shared.shares_endpoint());
        assert_eq!(shared.max_pool_size(), SHARED_POOL_SIZE);

        let dev = RelaySettings::new(
            endpoint("localhost", 5432, "app"),
            endpoint("db-replica", 5432, "app"),
            true,
        );
        assert_eq!(dev.max_pool_size(), DEV_POOL_SIZE);
    }

    #[test]
    fn validation_flags_missing_fields() {
        let mut incomplete = endpoint("db", 5432, "app");
        incomplete.password = None;
        let settings = RelaySettings::new(endpoint("db", 5432, "app"), incomplete, false);
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, RelayDbError::ConfigError(msg) if msg.starts_with("replica")));
    }
}
