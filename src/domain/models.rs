//! Shared Domain Types

/// Lifecycle of a registration process.
///
/// The startup sequence is strictly linear; the only other transition is
/// driven by the interrupt signal, which takes `Running` through
/// `Unregistering` to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Init,
    AdapterPowered,
    ObjectsExported,
    Registered,
    Running,
    Unregistering,
    Terminated,
}
