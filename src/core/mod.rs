// Core modules implementing the typed row model, comparators, ordering, and errors.
pub mod compare;
pub mod error;
pub mod kind;
pub mod order;
pub mod render;
pub mod table;
pub mod value;
