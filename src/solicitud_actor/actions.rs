//! Custom actions for the Solicitud actor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolicitudAction {
    /// `Pending → Approved`. Approving an approved solicitud is a no-op
    /// and writes nothing.
    Approve,
}
