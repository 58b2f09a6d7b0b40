use crate::dto::HealthRes;

/// Simple health service used by the REST API and the run binary.
///
/// The service is healthy when the triage data directory is reachable.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static health check without creating an instance.
    ///
    /// # Arguments
    /// * `storage_available` - whether the triage data directory exists
    ///
    /// # Returns
    /// A `HealthRes` with `ok` mirroring storage availability.
    pub fn check_health(storage_available: bool) -> HealthRes {
        if storage_available {
            HealthRes {
                ok: true,
                message: "Triage service is alive".into(),
            }
        } else {
            HealthRes {
                ok: false,
                message: "Triage storage is unavailable".into(),
            }
        }
    }

    pub fn check_health_instance(&self, storage_available: bool) -> HealthRes {
        Self::check_health(storage_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_reflects_storage() {
        assert!(HealthService::check_health(true).ok);

        let res = HealthService::new().check_health_instance(false);
        assert!(!res.ok);
        assert_eq!(res.message, "Triage storage is unavailable");
    }
}
