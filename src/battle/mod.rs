pub mod executor;
pub mod state;
pub mod stats;
pub mod texts;
pub mod turn;

#[cfg(test)]
mod tests;
