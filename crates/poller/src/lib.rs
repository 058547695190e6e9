pub mod cycle;
pub mod fetch;
pub mod logging;
pub mod supervisor;

#[cfg(test)]
mod testing;
