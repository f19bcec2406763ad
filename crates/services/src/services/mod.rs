pub mod planning_version;
pub mod schedule;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;
