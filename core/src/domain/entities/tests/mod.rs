#[cfg(test)]
mod verification_tests;
#[cfg(test)]
mod action_tests;
