//! Model artifacts: the JSON tree-ensemble format and the startup loader.

pub mod ensemble;
pub mod model_set;

pub use ensemble::{ColumnSpec, Node, Task, Tree, TreeEnsemble};
pub use model_set::{load_model, ModelSet};
