pub mod commands;
pub mod document;
pub mod goto_file;

#[cfg(test)]
pub(crate) mod test_support;
