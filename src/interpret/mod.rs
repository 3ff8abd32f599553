pub(crate) mod cost;
pub(crate) mod interpreter;
pub(crate) mod split;
