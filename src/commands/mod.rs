pub mod export;
pub mod parse;
#[cfg(test)]
mod tests;
