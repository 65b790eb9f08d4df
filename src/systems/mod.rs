pub(crate) mod fetch;
