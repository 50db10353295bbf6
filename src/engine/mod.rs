pub(crate) mod coalesce;
pub(crate) mod orchestrator;
pub(crate) mod render;
pub(crate) mod simulate;
pub(crate) mod state;
