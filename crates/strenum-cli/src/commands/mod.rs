pub mod dump;
pub mod generate;
pub mod run_common;
pub mod source_loader;

#[cfg(test)]
mod generate_tests;
#[cfg(test)]
mod source_loader_tests;
