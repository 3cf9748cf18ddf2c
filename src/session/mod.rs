pub(crate) mod action;
pub(crate) mod controller;
pub(crate) mod preview;
pub(crate) mod state;
