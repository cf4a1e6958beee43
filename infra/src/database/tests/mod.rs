#[cfg(test)]
mod connection_tests;
#[cfg(test)]
mod predicate_sql_tests;
