//! Statement handlers.
//!
//! ## Modules
//!
//! - `block`: blocks and single-statement bodies
//! - `funcs`: function declarations, parameters and function bodies
//! - `class`: class declarations and methods
//! - `control`: `if`, `for`, `return`, `break`/`continue`, `yield`
//! - `assign`: variable declarations, assignments and compound assignments
//! - `imports`: `import` and `from ... import`

mod assign;
mod block;
mod class;
mod control;
mod funcs;
mod imports;

pub(crate) use funcs::param_list;
