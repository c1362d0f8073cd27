use crate::kernel::state::PersistedSession;

/// Work the host performs after a dispatch; the store itself never does I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistSession(PersistedSession),
}
