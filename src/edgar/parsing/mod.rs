pub mod xbrl;

#[cfg(test)]
pub mod tests;
