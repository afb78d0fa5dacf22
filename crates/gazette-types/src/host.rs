use crate::models::Principal;

/// Capabilities the host runtime supplies for each invocation: who is
/// calling, what time it is, and fresh identifiers.
///
/// The service never reaches for ambient globals; it reads all three
/// through this trait so tests can substitute deterministic fakes.
pub trait HostEnv {
    /// Identity of the caller of the current invocation.
    fn caller(&self) -> Principal;

    /// Current host time in nanoseconds.
    fn now(&self) -> u64;

    /// A fresh unique identifier. Assumed collision-free; never verified
    /// against stored ids.
    fn generate_id(&self) -> Principal;
}

/// Production host: the session layer fixes the caller at construction,
/// time comes from the system clock, ids from random UUIDs.
#[derive(Debug, Clone)]
pub struct SystemHost {
    caller: Principal,
}

impl SystemHost {
    pub fn for_caller(caller: Principal) -> Self {
        Self { caller }
    }
}

impl HostEnv for SystemHost {
    fn caller(&self) -> Principal {
        self.caller.clone()
    }

    fn now(&self) -> u64 {
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64
    }

    fn generate_id(&self) -> Principal {
        Principal::generate()
    }
}
