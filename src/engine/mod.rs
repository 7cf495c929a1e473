pub(crate) mod chain;
pub(crate) mod executor;
pub(crate) mod glitcher;
pub(crate) mod grid;
pub(crate) mod options;
pub(crate) mod ring;
