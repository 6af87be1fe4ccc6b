// ChatFolders state managers
// Managers own the stateful parts: the document library, the transient
// expansion map, persistence and the time source.

pub mod clock;
pub mod expansion_state;
pub mod library_manager;
pub mod storage_manager;
