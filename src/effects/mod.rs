pub(crate) mod marquee;
pub(crate) mod preview;
