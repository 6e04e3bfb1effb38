pub mod execution_test;
pub mod governance_test;
