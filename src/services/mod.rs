// Vesselmarks services
// Stateless logic over the simulation snapshot.

pub mod refresh_resolver;
