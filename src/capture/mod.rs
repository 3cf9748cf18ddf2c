pub(crate) mod camera;
pub(crate) mod countdown;
pub(crate) mod sequencer;
pub(crate) mod sources;
