pub mod migrate;
pub mod unlock;
