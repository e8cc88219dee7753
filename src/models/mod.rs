pub mod calculation;
pub mod measurement;
pub mod site;
