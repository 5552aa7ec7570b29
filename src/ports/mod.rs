/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe everything the sync core needs
/// from the outside world: the producer, the renderer and the log.
pub mod outbound;
