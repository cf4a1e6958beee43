#[cfg(test)]
mod mocks;
#[cfg(test)]
mod bulk_tests;
#[cfg(test)]
mod quick_action_tests;
