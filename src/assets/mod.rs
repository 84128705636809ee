pub(crate) mod fallback;
