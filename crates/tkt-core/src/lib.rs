//! Core tkt library (config, session, API client, store, routes, markdown).

pub mod api;
pub mod config;
pub mod logging;
pub mod markdown;
pub mod routes;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util {
    //! Shared helpers for tests that redirect TKT_HOME.

    use std::sync::{Mutex, MutexGuard, PoisonError};

    use tempfile::TempDir;

    // TKT_HOME is process-global; serialize the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Points TKT_HOME at a fresh temp dir for the duration of the guard.
    pub fn setup_temp_tkt_home() -> (MutexGuard<'static, ()>, TempDir) {
        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let temp = TempDir::new().unwrap();
        // SAFETY: ENV_LOCK serializes access to the environment variable
        unsafe {
            std::env::set_var("TKT_HOME", temp.path());
        }
        (guard, temp)
    }
}
