pub(crate) mod ease;
pub(crate) mod playhead;
pub(crate) mod sink;
pub(crate) mod timeline;
pub(crate) mod tween;
pub(crate) mod value;
