pub(crate) mod binding;
pub(crate) mod navigate;
pub(crate) mod pin;
pub(crate) mod remap;
pub(crate) mod sections;
pub(crate) mod source;
