pub(crate) mod download;
