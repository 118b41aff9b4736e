pub mod array;
pub mod array2d;
pub mod bounded;
pub mod cell;
pub mod code;
pub mod frame;
pub mod panels;
pub mod stack;
pub mod subtitle;
pub mod tree;
pub mod variables;
