pub mod hashed_tree_sort;
pub mod tree_sort;
