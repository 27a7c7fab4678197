pub(crate) mod console;
pub(crate) mod dump;
pub(crate) mod logging;
pub(crate) mod serve;
pub(crate) mod source_args;
